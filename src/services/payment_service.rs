use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    entity::users::{ActiveModel as UserActive, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    payment::with_deadline,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Register the caller with the payment processor so orders can be authorized
/// against a stored customer.
pub async fn create_payment_customer(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    if existing.payment_customer_id.is_some() {
        return Err(AppError::Conflict("Payment customer already exists".into()));
    }

    let customer_id = with_deadline(
        state.config.payment.timeout,
        state.payments.create_customer(&existing.email),
    )
    .await?;

    let mut active: UserActive = existing.into();
    active.payment_customer_id = Set(Some(customer_id));
    let updated = active.update(&state.orm).await?;

    tracing::info!(user_id = %updated.id, "payment customer created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "payment_customer_create",
        "users",
        serde_json::json!({ "user_id": updated.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment customer created",
        User::from(updated),
        Some(Meta::empty()),
    ))
}
