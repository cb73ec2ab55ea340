use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::partners::{CreatePartnerRequest, PartnerList, UpdatePartnerRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Partner,
    response::ApiResponse,
    services::partner_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_partners).post(create_partner))
        .route("/{id}", get(get_partner).put(update_partner))
}

#[utoipa::path(
    post,
    path = "/api/partners",
    request_body = CreatePartnerRequest,
    responses(
        (status = 200, description = "Open a partner account for the caller", body = ApiResponse<Partner>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Partner account already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn create_partner(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePartnerRequest>,
) -> AppResult<Json<ApiResponse<Partner>>> {
    let resp = partner_service::create_partner(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/partners",
    responses(
        (status = 200, description = "List visible partners", body = ApiResponse<PartnerList>)
    ),
    tag = "Partners"
)]
pub async fn list_partners(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PartnerList>>> {
    let resp = partner_service::list_partners(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    params(
        ("id" = Uuid, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Get partner", body = ApiResponse<Partner>),
        (status = 404, description = "Partner not found")
    ),
    tag = "Partners"
)]
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Partner>>> {
    let resp = partner_service::get_partner(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    params(
        ("id" = Uuid, Path, description = "Partner ID")
    ),
    request_body = UpdatePartnerRequest,
    responses(
        (status = 200, description = "Update partner", body = ApiResponse<Partner>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Partner not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn update_partner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartnerRequest>,
) -> AppResult<Json<ApiResponse<Partner>>> {
    let resp = partner_service::update_partner(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
