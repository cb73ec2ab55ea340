use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{
        ConfirmOrderRequest, CreateOrderRequest, OrderLineDetail, OrderList, OrderWithProducts,
    },
    entity::{
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
            PaymentStatus,
        },
        products::{self, Column as ProdCol, Entity as Products},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{LineItem, Order, Product},
    payment::{
        AuthorizeRequest, IntentStatus, processor_idempotency_key, to_minor_units, with_deadline,
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

const SERIAL_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SERIAL_LEN: usize = 8;

/// Unit price a line is charged at: the discounted price when one exists.
pub fn unit_price(product: &products::Model) -> f64 {
    product.discounted_price.unwrap_or(product.price)
}

/// Sum of `unit price * quantity` over every line plus the delivery fee.
pub fn order_total<I>(lines: I, delivery_fee: f64) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| price * f64::from(quantity))
        .sum::<f64>()
        + delivery_fee
}

/// Display label for an order. Random and not checked for uniqueness;
/// the order id is the real identifier.
pub fn generate_serial_number() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SERIAL_LEN);
    for _ in 0..SERIAL_LEN {
        suffix.push(SERIAL_ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    format!("ORD-{}", suffix)
}

fn validate_lines(lines: &[LineItem]) -> AppResult<()> {
    if lines.is_empty() {
        return Err(AppError::BadRequest("Order has no products".into()));
    }
    if lines.iter().any(|l| l.quantity <= 0) {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }
    Ok(())
}

async fn find_by_idempotency_key(
    state: &AppState,
    user_id: Uuid,
    key: &str,
) -> AppResult<Option<OrderModel>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user_id))
                .add(OrderCol::IdempotencyKey.eq(key)),
        )
        .one(&state.orm)
        .await?;
    Ok(order)
}

/// Visible to its owner and to admins. Anyone else gets `NotFound`.
async fn find_visible_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    if order.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::NotFound("Order"));
    }
    Ok(order)
}

/// Capture the hold behind an order. A capture that already went through (a
/// retry after the bookkeeping failed) is rejected by the processor, so a
/// failed call falls back to reading the intent.
async fn capture_funds(state: &AppState, order_id: Uuid, intent_id: &str) -> AppResult<()> {
    let deadline = state.config.payment.timeout;
    let intent = match with_deadline(deadline, state.payments.capture(intent_id)).await {
        Ok(intent) => intent,
        Err(err) => {
            tracing::warn!(%order_id, error = %err, "capture failed, checking intent state");
            let current = with_deadline(deadline, state.payments.retrieve(intent_id)).await?;
            if current.status != IntentStatus::Succeeded {
                return Err(err.into());
            }
            tracing::info!(%order_id, "intent was already captured");
            current
        }
    };

    if intent.status != IntentStatus::Succeeded {
        tracing::warn!(%order_id, status = ?intent.status, "capture did not succeed");
        return Err(AppError::PaymentFailed("Payment capture failed".into()));
    }
    Ok(())
}

/// Void the hold behind an order before its row goes away. If a capture got
/// there first the cancel fails and the order has to stay.
async fn release_authorization(
    state: &AppState,
    order_id: Uuid,
    intent_id: &str,
) -> AppResult<()> {
    let deadline = state.config.payment.timeout;
    let err = match with_deadline(deadline, state.payments.cancel(intent_id)).await {
        Ok(_) => return Ok(()),
        Err(err) => err,
    };

    let current = with_deadline(deadline, state.payments.retrieve(intent_id)).await?;
    match current.status {
        IntentStatus::Canceled => Ok(()),
        IntentStatus::Succeeded => {
            tracing::warn!(%order_id, "delete refused, payment already captured");
            Err(AppError::Conflict("Order payment has already been captured".into()))
        }
        _ => Err(err.into()),
    }
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    idempotency_key: Option<String>,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    validate_lines(&payload.products)?;

    if let Some(key) = idempotency_key.as_deref() {
        if let Some(existing) = find_by_idempotency_key(state, user.user_id, key).await? {
            tracing::info!(order_id = %existing.id, "replayed order creation");
            return Ok(ApiResponse::success(
                "Order already placed",
                Order::try_from(existing)?,
                Some(Meta::empty()),
            ));
        }
    }

    let owner = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    let customer_id = owner
        .payment_customer_id
        .ok_or(AppError::NotFound("Payment customer"))?;

    let ids: Vec<Uuid> = payload.products.iter().map(|l| l.product_id).collect();
    let catalog: HashMap<Uuid, products::Model> = Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut priced = Vec::with_capacity(payload.products.len());
    for line in &payload.products {
        let product = catalog
            .get(&line.product_id)
            .ok_or(AppError::NotFound("Product"))?;
        priced.push((unit_price(product), line.quantity));
    }
    let delivery_fee = state.config.delivery_fee;
    let total_price = order_total(priced, delivery_fee);

    let deadline = state.config.payment.timeout;
    with_deadline(
        deadline,
        state
            .payments
            .attach_payment_method(&customer_id, &payload.payment_method_id),
    )
    .await?;

    let intent = with_deadline(
        deadline,
        state.payments.authorize(AuthorizeRequest {
            customer_id,
            payment_method_id: payload.payment_method_id.clone(),
            amount: to_minor_units(total_price),
            currency: state.config.payment.currency.clone(),
            idempotency_key: idempotency_key
                .as_deref()
                .map(|key| processor_idempotency_key(user.user_id, key)),
        }),
    )
    .await?;

    if intent.id.is_empty() {
        tracing::warn!(user_id = %user.user_id, "authorization returned no intent id");
        return Err(AppError::PaymentFailed("Payment failed, try again".into()));
    }

    let now = Utc::now();
    let inserted = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        serial_number: Set(generate_serial_number()),
        products: Set(serde_json::to_value(&payload.products)?),
        total_price: Set(total_price),
        delivery_fee: Set(delivery_fee),
        is_confirmed: Set(false),
        payment_status: Set(PaymentStatus::Pending),
        payment_intent_id: Set(Some(intent.id.clone())),
        idempotency_key: Set(idempotency_key.clone()),
        payment_method: Set(payload.payment_method),
        mobile_number: Set(payload.mobile_number),
        country: Set(payload.country),
        address: Set(payload.address),
        apartment: Set(payload.apartment),
        city: Set(payload.city),
        state: Set(payload.state),
        zip_code: Set(payload.zip_code),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await;

    let order = match (inserted, idempotency_key.as_deref()) {
        (Ok(order), _) => order,
        // A concurrent retry with the same key won the insert. The processor saw
        // the same key too, so both requests share one authorization.
        (Err(err), Some(key))
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
        {
            find_by_idempotency_key(state, user.user_id, key)
                .await?
                .ok_or(AppError::OrmError(err))?
        }
        (Err(err), _) => return Err(err.into()),
    };

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "total_price": order.total_price,
            "payment_intent_id": intent.id,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order placed",
        Order::try_from(order)?,
        Some(Meta::empty()),
    ))
}

pub async fn confirm_order(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    payload: ConfirmOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    let intent_id = order
        .payment_intent_id
        .clone()
        .ok_or(AppError::NotFound("Payment intent"))?;
    if order.payment_status == PaymentStatus::Completed {
        return Err(AppError::Conflict("Order already confirmed".into()));
    }

    capture_funds(state, order.id, &intent_id).await?;

    let lines: Vec<LineItem> = serde_json::from_value(order.products.clone())?;

    let txn = state.orm.begin().await?;

    let updated = Orders::update_many()
        .col_expr(OrderCol::IsConfirmed, Expr::value(payload.status))
        .col_expr(
            OrderCol::PaymentStatus,
            Expr::value(PaymentStatus::Completed.to_value()),
        )
        .col_expr(OrderCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(OrderCol::Id.eq(order.id))
        .filter(OrderCol::PaymentStatus.eq(PaymentStatus::Pending.to_value()))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        txn.rollback().await?;
        let current = Orders::find_by_id(order.id).one(&state.orm).await?;
        if current.is_none() {
            tracing::error!(
                order_id = %order.id,
                payment_intent_id = %intent_id,
                "funds captured for an order that no longer exists"
            );
            return Err(AppError::NotFound("Order"));
        }
        return Err(AppError::Conflict("Order already confirmed".into()));
    }

    for line in &lines {
        Products::update_many()
            .col_expr(
                ProdCol::TotalSell,
                Expr::col(ProdCol::TotalSell).add(line.quantity),
            )
            .filter(ProdCol::Id.eq(line.product_id))
            .exec(&txn)
            .await?;
    }

    let order = Orders::find_by_id(order.id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Order"))?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_confirm",
        "orders",
        serde_json::json!({ "order_id": order.id, "is_confirmed": order.is_confirmed }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order confirmed",
        Order::try_from(order)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let order = find_visible_order(state, user, id).await?;
    if order.is_confirmed || order.payment_status == PaymentStatus::Completed {
        return Err(AppError::Conflict("Cannot delete a confirmed order".into()));
    }

    if let Some(intent_id) = order.payment_intent_id.as_deref() {
        release_authorization(state, order.id, intent_id).await?;
    }

    // Guarded so a confirm landing in between is not lost.
    let deleted = Orders::delete_many()
        .filter(OrderCol::Id.eq(order.id))
        .filter(OrderCol::IsConfirmed.eq(false))
        .filter(OrderCol::PaymentStatus.eq(PaymentStatus::Pending.to_value()))
        .exec(&state.orm)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(AppError::Conflict("Cannot delete a confirmed order".into()));
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if !user.is_admin() {
        condition = condition.add(OrderCol::UserId.eq(user.user_id));
    }
    if let Some(status) = query.payment_status {
        condition = condition.add(OrderCol::PaymentStatus.eq(status.to_value()));
    }
    if let Some(is_confirmed) = query.is_confirmed {
        condition = condition.add(OrderCol::IsConfirmed.eq(is_confirmed));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order_by_id(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithProducts>> {
    let order = Order::try_from(find_visible_order(state, user, id).await?)?;

    let ids: Vec<Uuid> = order.products.iter().map(|l| l.product_id).collect();
    let current: HashMap<Uuid, products::Model> = Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    // Quantities come from the snapshot; product details are today's.
    let items = order
        .products
        .iter()
        .map(|line| OrderLineDetail {
            product_id: line.product_id,
            quantity: line.quantity,
            product: current
                .get(&line.product_id)
                .cloned()
                .map(Product::from),
        })
        .collect();

    Ok(ApiResponse::success(
        "Order",
        OrderWithProducts { order, items },
        Some(Meta::empty()),
    ))
}
