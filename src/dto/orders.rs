use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{LineItem, Order, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub products: Vec<LineItem>,
    /// Processor payment-method reference to attach and charge.
    pub payment_method_id: String,
    pub payment_method: Option<String>,
    pub mobile_number: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub apartment: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmOrderRequest {
    pub status: bool,
}

/// A historical line item next to the product as it exists today.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineDetail {
    pub product_id: Uuid,
    pub quantity: i32,
    pub product: Option<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithProducts {
    pub order: Order,
    pub items: Vec<OrderLineDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
