use chrono::Utc;
use sqlx::FromRow;

use crate::{
    dto::cart::{AddToCartRequest, CartEntry, RemoveFromCartRequest},
    error::{AppError, AppResult},
    services::{auth_service, rows::ProductRow},
    state::AppState,
};

async fn require_user_id(state: &AppState, email: &str) -> AppResult<i64> {
    auth_service::lookup_user_id(&state.pool, email)
        .await?
        .ok_or(AppError::NotFound)
}

/// Add a product to the cart. The (user, product) pair is unique; adding an
/// item that is already present replaces its quantity.
pub async fn add_to_cart(state: &AppState, payload: AddToCartRequest) -> AppResult<()> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".into()));
    }

    let user_id = require_user_id(state, &payload.email).await?;

    let product = sqlx::query_scalar::<_, i64>("SELECT id FROM products WHERE id = ?")
        .bind(payload.product_id)
        .fetch_optional(&state.pool)
        .await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let now = Utc::now();
    sqlx::query(
        "INSERT INTO cart_items (user_id, product_id, quantity, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(user_id, product_id) \
         DO UPDATE SET quantity = excluded.quantity, updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(payload.product_id)
    .bind(payload.quantity)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?;

    Ok(())
}

#[derive(FromRow)]
struct CartRow {
    #[sqlx(flatten)]
    product: ProductRow,
    quantity: i64,
}

pub async fn get_cart(state: &AppState, email: &str) -> AppResult<Vec<CartEntry>> {
    let user_id = require_user_id(state, email).await?;

    let rows: Vec<CartRow> = sqlx::query_as(
        "SELECT p.id, p.name, p.price, p.short_description, p.long_description, \
                p.sku, p.discount, p.images, p.category_id, p.created_at, p.updated_at, \
                c.id AS cat_id, c.name AS cat_name, c.alias AS cat_alias, ci.quantity \
         FROM cart_items ci \
         JOIN products p ON ci.product_id = p.id \
         JOIN categories c ON p.category_id = c.id \
         WHERE ci.user_id = ? \
         ORDER BY ci.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let entries = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.product.id;
            match row.product.into_product() {
                Ok(product) => Some(CartEntry {
                    product,
                    quantity: row.quantity,
                }),
                Err(err) => {
                    tracing::warn!(product_id = id, error = %err, "skipping cart row with bad image list");
                    None
                }
            }
        })
        .collect();

    Ok(entries)
}

pub async fn remove_from_cart(state: &AppState, payload: RemoveFromCartRequest) -> AppResult<()> {
    let user_id = require_user_id(state, &payload.email).await?;

    sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
        .bind(user_id)
        .bind(payload.product_id)
        .execute(&state.pool)
        .await?;

    Ok(())
}
