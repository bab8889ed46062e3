use serde::Deserialize;
use utoipa::ToSchema;

/// Replaces the user's favorites wholesale; order is preserved.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveFavoritesRequest {
    pub email: String,
    pub product_ids: Vec<i64>,
}
