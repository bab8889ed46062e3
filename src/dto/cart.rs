use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub email: String,
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveFromCartRequest {
    pub email: String,
    pub product_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: i64,
}
