use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Order;

/// Guest checkout: registers the account inline with the order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_ids: Vec<i64>,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderAuthRequest {
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}
