use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Catalog listing filters. All fields are optional; `ids` is a
/// comma-separated list and tokens that fail to parse are dropped.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ProductListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ids: Option<String>,
    pub category_id: Option<i64>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub has_discount: Option<bool>,
    pub search: Option<String>,
}

impl ProductListQuery {
    /// Clamp paging to sane bounds: limit in 1..=100 (default 20), offset
    /// never negative.
    pub fn normalize(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }

    pub fn parsed_ids(&self) -> Vec<i64> {
        self.ids
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|tok| tok.trim().parse::<i64>().ok())
            .collect()
    }
}
