use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::dashboard::{DashboardData, DashboardQuery, WalletData, WalletQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/wallet", get(get_wallet))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(
        ("month" = u32, Query, description = "Month, 1-12"),
        ("year" = i32, Query, description = "Year")
    ),
    responses(
        (status = 200, description = "Admin dashboard figures", body = ApiResponse<DashboardData>),
        (status = 400, description = "Invalid month"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<ApiResponse<DashboardData>>> {
    let resp = dashboard_service::get_dashboard(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/wallet",
    params(
        ("year" = i32, Query, description = "Year")
    ),
    responses(
        (status = 200, description = "Revenue totals and monthly breakdown", body = ApiResponse<WalletData>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<WalletQuery>,
) -> AppResult<Json<ApiResponse<WalletData>>> {
    let resp = dashboard_service::get_wallet(&state, &user, query).await?;
    Ok(Json(resp))
}
