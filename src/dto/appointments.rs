use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Appointment;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub partner_id: Uuid,
    /// Admins may book for another user; everyone else books for themselves.
    pub patient_id: Option<Uuid>,
    pub date: NaiveDate,
    /// Free-form slot label such as `09:00-09:30`.
    pub time_slot: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AppointmentList {
    #[schema(value_type = Vec<Appointment>)]
    pub items: Vec<Appointment>,
}
