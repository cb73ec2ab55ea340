mod common;

use chrono::{Datelike, Utc};
use common::FakeGateway;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;
use wellness_marketplace_api::{
    dto::dashboard::{DashboardData, DashboardQuery, WalletData, WalletQuery},
    entity::orders::{self, PaymentStatus},
    error::AppError,
    middleware::auth::AuthUser,
    services::dashboard_service,
    state::AppState,
};

async fn insert_order(
    state: &AppState,
    user: &AuthUser,
    total_price: f64,
    payment_status: PaymentStatus,
) -> anyhow::Result<orders::Model> {
    let now = Utc::now().fixed_offset();
    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        serial_number: Set(format!("ORD-T{}", &Uuid::new_v4().simple().to_string()[..7])),
        products: Set(serde_json::json!([])),
        total_price: Set(total_price),
        delivery_fee: Set(0.0),
        is_confirmed: Set(payment_status == PaymentStatus::Completed),
        payment_status: Set(payment_status),
        payment_intent_id: Set(None),
        idempotency_key: Set(None),
        payment_method: Set(Some("card".into())),
        mobile_number: Set(None),
        country: Set(None),
        address: Set(None),
        apartment: Set(None),
        city: Set(None),
        state: Set(None),
        zip_code: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await?;
    Ok(order)
}

async fn snapshot(state: &AppState, admin: &AuthUser) -> anyhow::Result<(DashboardData, WalletData)> {
    let today = Utc::now();
    let dashboard = dashboard_service::get_dashboard(
        state,
        admin,
        DashboardQuery {
            month: today.month(),
            year: today.year(),
        },
    )
    .await?
    .data
    .expect("dashboard");
    let wallet = dashboard_service::get_wallet(state, admin, WalletQuery { year: today.year() })
        .await?
        .data
        .expect("wallet");
    Ok((dashboard, wallet))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[tokio::test]
async fn pending_orders_never_count_as_revenue() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let admin = common::create_admin(&state).await?;
    let customer = common::create_customer(&state).await?;

    let (dash_before, wallet_before) = snapshot(&state, &admin).await?;

    let completed = insert_order(&state, &customer, 40.0, PaymentStatus::Completed).await?;
    let pending = insert_order(&state, &customer, 1000.0, PaymentStatus::Pending).await?;

    let (dash_after, wallet_after) = snapshot(&state, &admin).await?;

    assert!(close(dash_after.revenue - dash_before.revenue, 40.0));

    let dow = completed.created_at.with_timezone(&Utc).weekday().num_days_from_sunday() as usize;
    let day_delta = dash_after.sales_analytics[dow].amount - dash_before.sales_analytics[dow].amount;
    assert!(close(day_delta, 40.0));

    assert!(dash_after.recent_orders.iter().any(|o| o.id == completed.id));
    assert!(dash_after.recent_orders.iter().all(|o| o.id != pending.id));

    let month = completed.created_at.with_timezone(&Utc).month0() as usize;
    let month_delta =
        wallet_after.monthly_revenue[month].amount - wallet_before.monthly_revenue[month].amount;
    assert!(close(month_delta, 40.0));
    assert!(close(wallet_after.total_revenue - wallet_before.total_revenue, 40.0));
    assert!(close(wallet_after.yearly_revenue - wallet_before.yearly_revenue, 40.0));
    assert_eq!(wallet_after.total_order, wallet_before.total_order + 1);
    Ok(())
}

#[tokio::test]
async fn reports_are_admin_only() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let user = common::create_user(&state).await?;

    let err = dashboard_service::get_wallet(&state, &user, WalletQuery { year: 2026 })
        .await
        .expect_err("not an admin");
    assert!(matches!(err, AppError::Forbidden));

    let admin = common::create_admin(&state).await?;
    let err = dashboard_service::get_dashboard(&state, &admin, DashboardQuery { month: 13, year: 2026 })
        .await
        .expect_err("bad month");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}
