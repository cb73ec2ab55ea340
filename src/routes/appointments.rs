use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::appointments::{AppointmentList, CreateAppointmentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Appointment,
    response::ApiResponse,
    services::appointment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment))
        .route("/partner/{partner_id}", get(partner_appointments))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Book a consultation", body = ApiResponse<Appointment>),
        (status = 400, description = "Missing slot or past date"),
        (status = 403, description = "Booking for another user"),
        (status = 404, description = "Partner or patient not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::create_appointment(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/appointments/partner/{partner_id}",
    params(
        ("partner_id" = Uuid, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Bookings for a partner", body = ApiResponse<AppointmentList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn partner_appointments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(partner_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_partner_appointments(&state, &user, partner_id).await?;
    Ok(Json(resp))
}
