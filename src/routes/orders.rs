use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{ConfirmOrderRequest, CreateOrderRequest, OrderList, OrderWithProducts},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";
const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/confirm/{order_id}", post(confirm_order))
        .route("/{id}", get(get_order).delete(delete_order))
}

fn idempotency_key(headers: &HeaderMap) -> AppResult<Option<String>> {
    let Some(value) = headers.get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };
    let key = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid Idempotency-Key header".into()))?
        .trim();
    if key.is_empty() {
        return Ok(None);
    }
    if key.len() > MAX_IDEMPOTENCY_KEY_LEN {
        return Err(AppError::BadRequest("Idempotency-Key is too long".into()));
    }
    Ok(Some(key.to_string()))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Retry-safe key for this order attempt")
    ),
    responses(
        (status = 200, description = "Order placed with funds authorized", body = ApiResponse<Order>),
        (status = 400, description = "Invalid line items"),
        (status = 402, description = "Payment failed, try again"),
        (status = 404, description = "User, payment customer or product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let key = idempotency_key(&headers)?;
    let resp = order_service::create_order(&state, &user, key, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/confirm/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    request_body = ConfirmOrderRequest,
    responses(
        (status = 200, description = "Payment captured and order confirmed (admin only)", body = ApiResponse<Order>),
        (status = 402, description = "Capture failed; order left unconfirmed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order or payment intent not found"),
        (status = 409, description = "Order already confirmed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn confirm_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<ConfirmOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::confirm_order(&state, &user, order_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Unconfirmed order deleted"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Cannot delete a confirmed order")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("payment_status" = Option<String>, Query, description = "PENDING or COMPLETED"),
        ("is_confirmed" = Option<bool>, Query, description = "Filter by confirmation"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Orders visible to the caller", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::get_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with current product details", body = ApiResponse<OrderWithProducts>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithProducts>>> {
    let resp = order_service::get_order_by_id(&state, &user, id).await?;
    Ok(Json(resp))
}
