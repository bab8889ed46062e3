use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    dto::products::{CreateReviewRequest, ProductDetailResponse, ProductListResponse},
    error::{AppError, AppResult},
    models::Review,
    routes::params::ProductListQuery,
    services::rows::{PRODUCT_SELECT, ProductRow},
    state::AppState,
};

/// Joins WHERE/AND so every filter branch composes the same way.
struct WhereSep {
    first: bool,
}

impl WhereSep {
    fn new() -> Self {
        Self { first: true }
    }

    fn next(&mut self) -> &'static str {
        if self.first {
            self.first = false;
            " WHERE "
        } else {
            " AND "
        }
    }
}

/// Appends the catalog predicate to a builder. Used for both the count
/// query and the page query so the reported total always matches the
/// filtered rows.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, query: &ProductListQuery) {
    let mut sep = WhereSep::new();

    let ids = query.parsed_ids();
    if !ids.is_empty() {
        qb.push(sep.next()).push("p.id IN (");
        let mut list = qb.separated(", ");
        for id in ids {
            list.push_bind(id);
        }
        qb.push(")");
    }

    if let Some(category_id) = query.category_id {
        qb.push(sep.next()).push("p.category_id = ").push_bind(category_id);
    }

    if let Some(price_from) = query.price_from {
        qb.push(sep.next()).push("p.price >= ").push_bind(price_from);
    }

    if let Some(price_to) = query.price_to {
        qb.push(sep.next()).push("p.price <= ").push_bind(price_to);
    }

    if query.has_discount == Some(true) {
        qb.push(sep.next()).push("p.discount > 0");
    }

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        qb.push(sep.next())
            .push("(p.name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.short_description LIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.long_description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn list_products(
    state: &AppState,
    query: ProductListQuery,
) -> AppResult<ProductListResponse> {
    let (limit, offset) = query.normalize();

    let mut count_qb = QueryBuilder::new(
        "SELECT COUNT(*) FROM products p JOIN categories c ON p.category_id = c.id",
    );
    push_filters(&mut count_qb, &query);
    let total: i64 = count_qb
        .build_query_scalar()
        .fetch_one(&state.pool)
        .await?;

    let mut qb = QueryBuilder::new(PRODUCT_SELECT);
    push_filters(&mut qb, &query);
    qb.push(" ORDER BY p.created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(&state.pool).await?;

    let products = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_product() {
                Ok(p) => Some(p),
                Err(err) => {
                    tracing::warn!(product_id = id, error = %err, "skipping product with bad image list");
                    None
                }
            }
        })
        .collect();

    Ok(ProductListResponse {
        products,
        total,
        limit,
        offset,
    })
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ProductDetailResponse> {
    let mut qb = QueryBuilder::new(PRODUCT_SELECT);
    qb.push(" WHERE p.id = ").push_bind(id);

    let row: Option<ProductRow> = qb.build_query_as().fetch_optional(&state.pool).await?;
    let row = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    let product = row
        .into_product()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt image list: {e}")))?;

    let reviews: Vec<Review> = sqlx::query_as(
        "SELECT id, product_id, name, text, rating, created_at FROM reviews \
         WHERE product_id = ? ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ProductDetailResponse { product, reviews })
}

pub async fn create_review(
    state: &AppState,
    product_id: i64,
    payload: CreateReviewRequest,
) -> AppResult<Review> {
    if payload.name.is_empty() || payload.text.is_empty() {
        return Err(AppError::BadRequest("invalid review data".into()));
    }
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest("invalid review data".into()));
    }

    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(&state.pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound);
    }

    let id = sqlx::query(
        "INSERT INTO reviews (product_id, name, text, rating, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(&payload.name)
    .bind(&payload.text)
    .bind(payload.rating)
    .bind(Utc::now())
    .execute(&state.pool)
    .await?
    .last_insert_rowid();

    let review: Review = sqlx::query_as(
        "SELECT id, product_id, name, text, rating, created_at FROM reviews WHERE id = ?",
    )
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: Option<&str>) -> ProductListQuery {
        ProductListQuery {
            limit: None,
            offset: None,
            ids: Some("1, 2,x,3".into()),
            category_id: Some(7),
            price_from: Some(10.0),
            price_to: Some(99.5),
            has_discount: Some(true),
            search: search.map(String::from),
        }
    }

    #[test]
    fn count_and_page_share_the_same_predicate() {
        let q = query(Some("ring"));

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut count_qb, &q);
        let mut page_qb = QueryBuilder::new("SELECT p.* FROM products p");
        push_filters(&mut page_qb, &q);

        let count_sql = count_qb.sql().to_string();
        let page_sql = page_qb.sql().to_string();
        let count_where = count_sql.split_once(" WHERE ").unwrap().1.to_string();
        let page_where = page_sql.split_once(" WHERE ").unwrap().1.to_string();
        assert_eq!(count_where, page_where);
    }

    #[test]
    fn malformed_ids_are_dropped_from_the_in_list() {
        let q = query(None);
        assert_eq!(q.parsed_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn no_filters_means_no_where_clause() {
        let q = ProductListQuery {
            limit: None,
            offset: None,
            ids: None,
            category_id: None,
            price_from: None,
            price_to: None,
            has_discount: None,
            search: None,
        };
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut qb, &q);
        assert!(!qb.sql().contains("WHERE"));
    }
}
