use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite};

use crate::{
    error::AppResult,
    models::{Banner, Category, News, Product},
    services::rows::{PRODUCT_SELECT, ProductRow},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories: Vec<Category> =
        sqlx::query_as("SELECT id, name, alias FROM categories ORDER BY name")
            .fetch_all(&state.pool)
            .await?;
    Ok(categories)
}

pub async fn list_news(state: &AppState) -> AppResult<Vec<News>> {
    let news: Vec<News> = sqlx::query_as(
        "SELECT id, title, description, image, created_at FROM news ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(news)
}

#[derive(FromRow)]
struct BannerRow {
    id: i64,
    product_id: i64,
    image: String,
    position: i64,
    created_at: DateTime<Utc>,
}

/// Resolve banner product ids with the same skip-row tolerance as the other
/// public listings; a product with a bad image list drops out of the map and
/// its banners render without product data.
async fn banner_products(state: &AppState, ids: &[i64]) -> AppResult<HashMap<i64, Product>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(PRODUCT_SELECT);
    qb.push(" WHERE p.id IN (");
    let mut list = qb.separated(", ");
    for id in ids {
        list.push_bind(*id);
    }
    qb.push(")");

    let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(&state.pool).await?;
    let products = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_product() {
                Ok(p) => Some((p.id, p)),
                Err(err) => {
                    tracing::warn!(product_id = id, error = %err, "skipping banner product with bad image list");
                    None
                }
            }
        })
        .collect();

    Ok(products)
}

/// Banners ordered by position, each carrying its product and category.
/// Several banners may point at the same product; each gets its own copy.
pub async fn list_banners(state: &AppState) -> AppResult<Vec<Banner>> {
    let rows: Vec<BannerRow> = sqlx::query_as(
        "SELECT id, product_id, image, position, created_at FROM banners ORDER BY position ASC",
    )
    .fetch_all(&state.pool)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
    let products = banner_products(state, &ids).await?;

    let banners = rows
        .into_iter()
        .map(|row| Banner {
            id: row.id,
            product_id: row.product_id,
            image: row.image,
            position: row.position,
            product: products.get(&row.product_id).cloned(),
            created_at: row.created_at,
        })
        .collect();

    Ok(banners)
}
