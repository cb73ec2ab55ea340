use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{AvailableTime, Partner};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePartnerRequest {
    pub title: String,
    pub profile_photo: Option<String>,
    pub phone_number: Option<String>,
    pub price_per_consultation: f64,
    pub available_day_start: String,
    pub available_day_end: String,
    #[serde(default)]
    pub available_time: Vec<AvailableTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePartnerRequest {
    pub title: Option<String>,
    pub profile_photo: Option<String>,
    pub phone_number: Option<String>,
    pub price_per_consultation: Option<f64>,
    pub available_day_start: Option<String>,
    pub available_day_end: Option<String>,
    pub available_time: Option<Vec<AvailableTime>>,
    pub is_visible: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PartnerList {
    #[schema(value_type = Vec<Partner>)]
    pub items: Vec<Partner>,
}
