//! Consultation bookings with partners. New bookings start PENDING.

use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::appointments::{AppointmentList, CreateAppointmentRequest},
    entity::{
        appointments::{ActiveModel, AppointmentStatus, Column, Entity as Appointments},
        partners::Entity as Partners,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Appointment,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Checks that need no database: a slot label and a date that is not in the past.
pub fn validate_booking(date: NaiveDate, time_slot: &str, today: NaiveDate) -> AppResult<()> {
    if time_slot.trim().is_empty() {
        return Err(AppError::BadRequest("time_slot must not be empty".into()));
    }
    if date < today {
        return Err(AppError::BadRequest(
            "appointment date must not be in the past".into(),
        ));
    }
    Ok(())
}

pub async fn create_appointment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    validate_booking(payload.date, &payload.time_slot, Utc::now().date_naive())?;

    let patient_id = payload.patient_id.unwrap_or(user.user_id);
    if patient_id != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    if Partners::find_by_id(payload.partner_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Partner"));
    }
    if Users::find_by_id(patient_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound("Patient"));
    }

    let appointment = ActiveModel {
        id: Set(Uuid::new_v4()),
        partner_id: Set(payload.partner_id),
        patient_id: Set(patient_id),
        date: Set(payload.date),
        time_slot: Set(payload.time_slot.trim().to_string()),
        status: Set(AppointmentStatus::Pending),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        appointment_id = %appointment.id,
        partner_id = %appointment.partner_id,
        "appointment booked"
    );
    audit::record(
        &state.pool,
        Some(user.user_id),
        "appointment_create",
        "appointments",
        serde_json::json!({ "appointment_id": appointment.id, "patient_id": patient_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment created successfully",
        Appointment::from(appointment),
        Some(Meta::empty()),
    ))
}

/// Bookings for one partner, soonest first. Visible to that partner and admins.
pub async fn list_partner_appointments(
    state: &AppState,
    user: &AuthUser,
    partner_id: Uuid,
) -> AppResult<ApiResponse<AppointmentList>> {
    let partner = Partners::find_by_id(partner_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Partner"))?;
    user.ensure_owner_or_admin(partner.user_id)?;

    let items = Appointments::find()
        .filter(Column::PartnerId.eq(partner_id))
        .order_by_asc(Column::Date)
        .order_by_asc(Column::TimeSlot)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Appointment::from)
        .collect();

    Ok(ApiResponse::success(
        "Appointments",
        AppointmentList { items },
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bookings_need_a_slot_and_a_current_date() {
        let today = date(2026, 10, 19);
        assert!(validate_booking(today, "09:00-09:30", today).is_ok());
        assert!(validate_booking(date(2026, 11, 2), "14:00", today).is_ok());
        assert!(matches!(
            validate_booking(date(2026, 10, 18), "09:00", today),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_booking(today, "  ", today),
            Err(AppError::BadRequest(_))
        ));
    }
}
