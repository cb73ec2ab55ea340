use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::blogs::{BlogList, CreateBlogRequest, UpdateBlogRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Blog,
    response::ApiResponse,
    services::blog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = CreateBlogRequest,
    responses(
        (status = 200, description = "Publish a blog post", body = ApiResponse<Blog>),
        (status = 400, description = "Empty title or content"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Blogs"
)]
pub async fn create_blog(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBlogRequest>,
) -> AppResult<Json<ApiResponse<Blog>>> {
    let resp = blog_service::create_blog(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "List blog posts, newest first", body = ApiResponse<BlogList>)
    ),
    tag = "Blogs"
)]
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<BlogList>>> {
    let resp = blog_service::list_blogs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog ID")
    ),
    responses(
        (status = 200, description = "Get blog post", body = ApiResponse<Blog>),
        (status = 404, description = "Blog not found")
    ),
    tag = "Blogs"
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Blog>>> {
    let resp = blog_service::get_blog(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog ID")
    ),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Update blog post", body = ApiResponse<Blog>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Blog not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blogs"
)]
pub async fn update_blog(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlogRequest>,
) -> AppResult<Json<ApiResponse<Blog>>> {
    let resp = blog_service::update_blog(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog ID")
    ),
    responses(
        (status = 200, description = "Delete blog post"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Blog not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blogs"
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = blog_service::delete_blog(&state, &user, id).await?;
    Ok(Json(resp))
}
