use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    codec,
    db::DbPool,
    dto::orders::{CreateOrderAuthRequest, CreateOrderRequest, OrderResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, Product},
    services::{
        auth_service,
        rows::{OrderRow, PRODUCT_SELECT, ProductRow, UserRow},
    },
    state::AppState,
};

/// Resolve a product-id list into full product+category records. A decode
/// failure on the stored list is a hard error for the response that needed
/// it, never silently dropped.
pub async fn products_by_ids(pool: &DbPool, ids: &[i64]) -> AppResult<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(PRODUCT_SELECT);
    qb.push(" WHERE p.id IN (");
    let mut list = qb.separated(", ");
    for id in ids {
        list.push_bind(*id);
    }
    qb.push(")");

    let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(pool).await?;
    rows.into_iter()
        .map(|row| {
            row.into_product()
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt image list: {e}")))
        })
        .collect()
}

fn decode_order_ids(raw: &str) -> AppResult<Vec<i64>> {
    codec::decode_id_list(raw)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt product id list: {e}")))
}

/// Reconstruct a created order together with its owning user and every
/// product the stored id list references.
async fn load_order_with_user(pool: &DbPool, order_id: i64) -> AppResult<Order> {
    let row: OrderRow = sqlx::query_as(
        "SELECT id, user_id, product_ids, status, created_at FROM orders WHERE id = ?",
    )
    .bind(order_id)
    .fetch_one(pool)
    .await?;

    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(row.user_id)
        .fetch_one(pool)
        .await?;

    let product_ids = decode_order_ids(&row.product_ids)?;
    let products = products_by_ids(pool, &product_ids).await?;

    Ok(Order {
        id: row.id,
        user_id: row.user_id,
        product_ids,
        status: row.status,
        created_at: row.created_at,
        user: Some(user.into_user()),
        products,
    })
}

async fn insert_order(pool: &DbPool, user_id: i64, product_ids: &[i64]) -> AppResult<i64> {
    let id = sqlx::query(
        "INSERT INTO orders (user_id, product_ids, status, created_at) VALUES (?, ?, 'new', ?)",
    )
    .bind(user_id)
    .bind(codec::encode_id_list(product_ids))
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Guest checkout: provisions the account from the checkout form, then
/// places the order and hands back a fresh token. The two inserts are not
/// one transaction; an account without an order is valid standalone state.
pub async fn create_guest_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<OrderResponse> {
    if payload.product_ids.is_empty() {
        return Err(AppError::BadRequest("Product IDs are required".into()));
    }

    if auth_service::lookup_user_id(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = auth_service::hash_password(&payload.password)?;
    let now = Utc::now();
    let user_id = sqlx::query(
        "INSERT INTO users (email, password, role, name, phone, delivery_address, created_at, updated_at) \
         VALUES (?, ?, 'user', ?, ?, ?, ?, ?)",
    )
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.delivery_address)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?
    .last_insert_rowid();

    let order_id = insert_order(&state.pool, user_id, &payload.product_ids).await?;
    let order = load_order_with_user(&state.pool, order_id).await?;
    let token = auth_service::issue_token(user_id, &payload.email, "user")?;

    Ok(OrderResponse {
        order,
        token: Some(token),
    })
}

/// Authenticated checkout: refreshes the profile fields instead of
/// creating an account.
pub async fn create_auth_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderAuthRequest,
) -> AppResult<OrderResponse> {
    if payload.product_ids.is_empty() {
        return Err(AppError::BadRequest("Product IDs are required".into()));
    }

    sqlx::query("UPDATE users SET name = ?, phone = ?, delivery_address = ?, updated_at = ? WHERE id = ?")
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.delivery_address)
        .bind(Utc::now())
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    let order_id = insert_order(&state.pool, user.user_id, &payload.product_ids).await?;
    let order = load_order_with_user(&state.pool, order_id).await?;

    Ok(OrderResponse { order, token: None })
}

pub async fn list_user_orders(state: &AppState, user_id: i64) -> AppResult<Vec<Order>> {
    let rows: Vec<OrderRow> = sqlx::query_as(
        "SELECT id, user_id, product_ids, status, created_at FROM orders \
         WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let product_ids = decode_order_ids(&row.product_ids)?;
        let products = products_by_ids(&state.pool, &product_ids).await?;
        orders.push(Order {
            id: row.id,
            user_id: row.user_id,
            product_ids,
            status: row.status,
            created_at: row.created_at,
            user: None,
            products,
        });
    }

    Ok(orders)
}
