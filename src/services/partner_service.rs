use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    audit,
    dto::partners::{CreatePartnerRequest, PartnerList, UpdatePartnerRequest},
    entity::{
        partners::{ActiveModel, Column, Entity as Partners},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Partner,
    response::{ApiResponse, Meta},
    state::AppState,
};

fn validate_fee(fee: f64) -> AppResult<()> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(AppError::BadRequest(
            "price_per_consultation must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Open a partner account for the caller and mark them as a partner.
pub async fn create_partner(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePartnerRequest,
) -> AppResult<ApiResponse<Partner>> {
    validate_fee(payload.price_per_consultation)?;

    let txn = state.orm.begin().await?;

    if Users::find_by_id(user.user_id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("User"));
    }
    let existing = Partners::find()
        .filter(Column::UserId.eq(user.user_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Partner account already exists".into()));
    }

    let partner = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        title: Set(payload.title),
        profile_photo: Set(payload.profile_photo),
        phone_number: Set(payload.phone_number),
        price_per_consultation: Set(payload.price_per_consultation),
        available_day_start: Set(payload.available_day_start),
        available_day_end: Set(payload.available_day_end),
        available_time: Set(serde_json::to_value(payload.available_time)?),
        is_visible: Set(true),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    Users::update_many()
        .col_expr(UserCol::IsPartner, Expr::value(true))
        .filter(UserCol::Id.eq(user.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "partner_create",
        "partners",
        serde_json::json!({ "partner_id": partner.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Partner account created",
        Partner::try_from(partner)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_partners(state: &AppState) -> AppResult<ApiResponse<PartnerList>> {
    let items = Partners::find()
        .filter(Column::IsVisible.eq(true))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Partner::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success("Partners", PartnerList { items }, None))
}

pub async fn get_partner(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Partner>> {
    let partner = Partners::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Partner"))?;
    Ok(ApiResponse::success("Partner", Partner::try_from(partner)?, None))
}

pub async fn update_partner(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdatePartnerRequest,
) -> AppResult<ApiResponse<Partner>> {
    let existing = Partners::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Partner"))?;
    user.ensure_owner_or_admin(existing.user_id)?;

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(photo) = payload.profile_photo {
        active.profile_photo = Set(Some(photo));
    }
    if let Some(phone) = payload.phone_number {
        active.phone_number = Set(Some(phone));
    }
    if let Some(fee) = payload.price_per_consultation {
        validate_fee(fee)?;
        active.price_per_consultation = Set(fee);
    }
    if let Some(start) = payload.available_day_start {
        active.available_day_start = Set(start);
    }
    if let Some(end) = payload.available_day_end {
        active.available_day_end = Set(end);
    }
    if let Some(slots) = payload.available_time {
        active.available_time = Set(serde_json::to_value(slots)?);
    }
    if let Some(is_visible) = payload.is_visible {
        active.is_visible = Set(is_visible);
    }

    let partner = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "partner_update",
        "partners",
        serde_json::json!({ "partner_id": partner.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Partner::try_from(partner)?,
        Some(Meta::empty()),
    ))
}
