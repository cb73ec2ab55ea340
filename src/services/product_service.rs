use uuid::Uuid;

use crate::{
    audit,
    entity::products::{ActiveModel, Column, Entity as Products},
    state::AppState,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
};
use crate::dto::products::{CreateProductRequest, ProductList, UpdateProductRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;

/// Price after a percentage discount, rounded to one decimal.
/// `None` when there is no discount to apply.
pub fn discounted_price(price: f64, discount: Option<f64>) -> Option<f64> {
    match discount {
        Some(d) if d > 0.0 => {
            let reduced = price - (price * d) / 100.0;
            Some((reduced * 10.0).round() / 10.0)
        }
        _ => None,
    }
}

fn validate_pricing(price: f64, discount: Option<f64>) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest("price must be a non-negative number".into()));
    }
    if let Some(d) = discount {
        if !(0.0..=100.0).contains(&d) {
            return Err(AppError::BadRequest("discount must be between 0 and 100".into()));
        }
    }
    Ok(())
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
    include_hidden: bool,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if !include_hidden {
        condition = condition.add(Column::IsVisible.eq(true));
    }

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(category) = query.category.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_pricing(payload.price, payload.discount)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        price: Set(payload.price),
        discount: Set(payload.discount),
        discounted_price: Set(discounted_price(payload.price, payload.discount)),
        is_visible: Set(payload.is_visible.unwrap_or(true)),
        total_sell: Set(0),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };

    let price = payload.price.unwrap_or(existing.price);
    let discount = payload.discount.or(existing.discount);
    validate_pricing(price, discount)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(is_visible) = payload.is_visible {
        active.is_visible = Set(is_visible);
    }
    active.price = Set(price);
    active.discount = Set(discount);
    active.discounted_price = Set(discounted_price(price, discount));

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if product.total_sell > 0 {
        return Err(AppError::Conflict(
            "Cannot delete product with sales history".into(),
        ));
    }

    Products::delete_by_id(id).exec(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_is_taken_off_the_list_price() {
        assert_eq!(discounted_price(20.0, Some(50.0)), Some(10.0));
        assert_eq!(discounted_price(19.99, Some(10.0)), Some(18.0));
        assert_eq!(discounted_price(100.0, Some(100.0)), Some(0.0));
    }

    #[test]
    fn missing_or_zero_discount_leaves_no_discounted_price() {
        assert_eq!(discounted_price(20.0, None), None);
        assert_eq!(discounted_price(20.0, Some(0.0)), None);
    }

    #[test]
    fn pricing_rejects_out_of_range_values() {
        assert!(validate_pricing(10.0, Some(10.0)).is_ok());
        assert!(matches!(
            validate_pricing(-1.0, None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_pricing(10.0, Some(120.0)),
            Err(AppError::BadRequest(_))
        ));
    }
}
