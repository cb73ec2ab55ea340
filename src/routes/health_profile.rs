use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::health_profile::{
        BaseProfileRequest, BaseProfileUpsert, GiHistoryRequest, GoalsMotivationRequest,
        HealthProfileDetail, NutritionProfileRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{GiHistory, GoalsMotivation, NutritionProfile},
    response::ApiResponse,
    services::health_profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", put(upsert_base_profile).get(get_my_profile))
        .route("/user/{user_id}", get(get_user_profile))
        .route("/{profile_id}/gi-history", put(upsert_gi_history))
        .route("/{profile_id}/nutrition", put(upsert_nutrition_profile))
        .route("/{profile_id}/goals", put(upsert_goals_motivation))
}

#[utoipa::path(
    put,
    path = "/api/health-profile",
    request_body = BaseProfileRequest,
    responses(
        (status = 200, description = "Create or update the clinical base profile", body = ApiResponse<BaseProfileUpsert>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn upsert_base_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BaseProfileRequest>,
) -> AppResult<Json<ApiResponse<BaseProfileUpsert>>> {
    let resp = health_profile_service::upsert_base_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/health-profile/{profile_id}/gi-history",
    params(
        ("profile_id" = Uuid, Path, description = "Health profile ID")
    ),
    request_body = GiHistoryRequest,
    responses(
        (status = 200, description = "Create or replace the GI history section", body = ApiResponse<GiHistory>),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Health profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn upsert_gi_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(payload): Json<GiHistoryRequest>,
) -> AppResult<Json<ApiResponse<GiHistory>>> {
    let resp =
        health_profile_service::upsert_gi_history(&state, &user, profile_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/health-profile/{profile_id}/nutrition",
    params(
        ("profile_id" = Uuid, Path, description = "Health profile ID")
    ),
    request_body = NutritionProfileRequest,
    responses(
        (status = 200, description = "Create or replace the nutrition section", body = ApiResponse<NutritionProfile>),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Health profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn upsert_nutrition_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(payload): Json<NutritionProfileRequest>,
) -> AppResult<Json<ApiResponse<NutritionProfile>>> {
    let resp =
        health_profile_service::upsert_nutrition_profile(&state, &user, profile_id, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/health-profile/{profile_id}/goals",
    params(
        ("profile_id" = Uuid, Path, description = "Health profile ID")
    ),
    request_body = GoalsMotivationRequest,
    responses(
        (status = 200, description = "Create or replace the goals and motivation section", body = ApiResponse<GoalsMotivation>),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Health profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn upsert_goals_motivation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(payload): Json<GoalsMotivationRequest>,
) -> AppResult<Json<ApiResponse<GoalsMotivation>>> {
    let resp =
        health_profile_service::upsert_goals_motivation(&state, &user, profile_id, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/health-profile",
    responses(
        (status = 200, description = "Caller's health profile with every section", body = ApiResponse<HealthProfileDetail>),
        (status = 404, description = "Health profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<HealthProfileDetail>>> {
    let resp = health_profile_service::get_health_profile(&state, &user, user.user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/health-profile/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "A user's health profile (owner or admin)", body = ApiResponse<HealthProfileDetail>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Health profile not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Health Profile"
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HealthProfileDetail>>> {
    let resp = health_profile_service::get_health_profile(&state, &user, user_id).await?;
    Ok(Json(resp))
}
