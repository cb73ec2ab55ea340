use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::{auth_service, payment_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/payment-customer", post(create_payment_customer))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user with intake completion flags", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::get_me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/me/payment-customer",
    responses(
        (status = 200, description = "Payment customer created", body = ApiResponse<User>),
        (status = 402, description = "Payment processor failure"),
        (status = 409, description = "Payment customer already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_payment_customer(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = payment_service::create_payment_customer(&state, &user).await?;
    Ok(Json(resp))
}
