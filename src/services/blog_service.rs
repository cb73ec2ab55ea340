use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::blogs::{BlogList, CreateBlogRequest, UpdateBlogRequest},
    entity::blogs::{ActiveModel, Column, Entity as Blogs},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Blog,
    response::{ApiResponse, Meta},
    state::AppState,
};

const WORDS_PER_MINUTE: usize = 200;

/// Word count and reading time in whole minutes, rounded up.
pub fn blog_stats(text: &str) -> (i32, i32) {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    (
        i32::try_from(words).unwrap_or(i32::MAX),
        i32::try_from(minutes).unwrap_or(i32::MAX),
    )
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

pub async fn create_blog(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBlogRequest,
) -> AppResult<ApiResponse<Blog>> {
    ensure_admin(user)?;
    require_text("title", &payload.title)?;
    require_text("content", &payload.content)?;

    let (word_count, reading_time) = blog_stats(&payload.content);
    let blog = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_string()),
        content: Set(payload.content),
        author: Set(payload.author),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        word_count: Set(word_count),
        reading_time: Set(reading_time),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "blog_create",
        "blogs",
        serde_json::json!({ "blog_id": blog.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Blog created successfully",
        Blog::from(blog),
        Some(Meta::empty()),
    ))
}

pub async fn update_blog(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBlogRequest,
) -> AppResult<ApiResponse<Blog>> {
    ensure_admin(user)?;
    let existing = Blogs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        require_text("title", &title)?;
        active.title = Set(title.trim().to_string());
    }
    if let Some(content) = payload.content {
        require_text("content", &content)?;
        let (word_count, reading_time) = blog_stats(&content);
        active.content = Set(content);
        active.word_count = Set(word_count);
        active.reading_time = Set(reading_time);
    }
    if let Some(author) = payload.author {
        active.author = Set(Some(author));
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let blog = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "blog_update",
        "blogs",
        serde_json::json!({ "blog_id": blog.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Blog updated successfully",
        Blog::from(blog),
        Some(Meta::empty()),
    ))
}

pub async fn delete_blog(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let deleted = Blogs::delete_by_id(id).exec(&state.orm).await?;
    if deleted.rows_affected == 0 {
        return Err(AppError::NotFound("Blog"));
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "blog_delete",
        "blogs",
        serde_json::json!({ "blog_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Blog deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_blogs(state: &AppState) -> AppResult<ApiResponse<BlogList>> {
    let items = Blogs::find()
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Blog::from)
        .collect();

    Ok(ApiResponse::success(
        "Blogs retrieved successfully",
        BlogList { items },
        None,
    ))
}

pub async fn get_blog(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Blog>> {
    let blog = Blogs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;
    Ok(ApiResponse::success(
        "Blog retrieved successfully",
        Blog::from(blog),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_rounds_up_to_whole_minutes() {
        assert_eq!(blog_stats(""), (0, 0));
        assert_eq!(blog_stats("   \n\t "), (0, 0));
        assert_eq!(blog_stats("gut  health\nmatters"), (3, 1));

        let exactly_two_minutes = vec!["word"; 400].join(" ");
        assert_eq!(blog_stats(&exactly_two_minutes), (400, 2));

        let just_over = vec!["word"; 401].join(" ");
        assert_eq!(blog_stats(&just_over), (401, 3));
    }
}
