use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Banner, Category};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerListResponse {
    pub banners: Vec<Banner>,
}
