use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DashboardQuery {
    /// 1-12
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WalletQuery {
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DaySales {
    pub day: String,
    pub amount: f64,
    pub percentage: i64,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct RecentOrder {
    pub id: Uuid,
    pub serial_number: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardData {
    pub total_partners: i64,
    pub total_products: i64,
    pub revenue: f64,
    pub sales_analytics: Vec<DaySales>,
    pub recent_orders: Vec<RecentOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyRevenue {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletData {
    pub total_products: i64,
    pub total_revenue: f64,
    pub total_order: i64,
    pub yearly_revenue: f64,
    pub monthly_revenue: Vec<MonthlyRevenue>,
}
