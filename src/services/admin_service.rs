//! Generic admin CRUD over the six managed resources. Handlers pass the
//! resource segment of the URL; everything resource-specific is dispatched
//! here.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::{
    codec::{
        BannerPayload, CategoryPayload, NewsPayload, OrderPayload, ProductPayload, UserPayload,
    },
    error::{AppError, AppResult},
    models::{Category, News},
    services::{auth_service, rows::{OrderRow, ProductRow, UserRow}},
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Products,
    Categories,
    Orders,
    News,
    Banners,
    Users,
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "categories" => Ok(Self::Categories),
            "orders" => Ok(Self::Orders),
            "news" => Ok(Self::News),
            "banners" => Ok(Self::Banners),
            "users" => Ok(Self::Users),
            _ => Err(AppError::BadRequest("Unknown resource".into())),
        }
    }
}

fn to_value<T: serde::Serialize>(record: &T) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(error = %err, "skipping unserializable record");
            None
        }
    }
}

/// List every row of a resource as loose JSON objects. A row that fails to
/// decode is skipped with a warning; the rest of the listing still renders.
/// User rows never carry the password hash.
pub async fn list_resource(state: &AppState, kind: ResourceKind) -> AppResult<Vec<Value>> {
    let data = match kind {
        ResourceKind::Products => {
            let rows: Vec<ProductRow> = sqlx::query_as(crate::services::rows::PRODUCT_SELECT)
                .fetch_all(&state.pool)
                .await?;
            rows.into_iter()
                .filter_map(|row| {
                    let id = row.id;
                    match row.into_product() {
                        Ok(p) => to_value(&p),
                        Err(err) => {
                            tracing::warn!(product_id = id, error = %err, "skipping product with bad image list");
                            None
                        }
                    }
                })
                .collect()
        }
        ResourceKind::Categories => {
            let rows: Vec<Category> =
                sqlx::query_as("SELECT id, name, alias FROM categories ORDER BY id")
                    .fetch_all(&state.pool)
                    .await?;
            rows.iter().filter_map(to_value).collect()
        }
        ResourceKind::Orders => {
            let rows: Vec<OrderRow> = sqlx::query_as(
                "SELECT id, user_id, product_ids, status, created_at FROM orders ORDER BY id",
            )
            .fetch_all(&state.pool)
            .await?;
            rows.into_iter()
                .filter_map(|row| match crate::codec::decode_id_list(&row.product_ids) {
                    Ok(ids) => Some(json!({
                        "id": row.id,
                        "user_id": row.user_id,
                        "product_ids": ids,
                        "status": row.status,
                        "created_at": row.created_at.to_rfc3339(),
                    })),
                    Err(err) => {
                        tracing::warn!(order_id = row.id, error = %err, "skipping order with bad product id list");
                        None
                    }
                })
                .collect()
        }
        ResourceKind::News => {
            let rows: Vec<News> = sqlx::query_as(
                "SELECT id, title, description, image, created_at FROM news ORDER BY id",
            )
            .fetch_all(&state.pool)
            .await?;
            rows.iter().filter_map(to_value).collect()
        }
        ResourceKind::Banners => {
            let rows: Vec<(i64, i64, String, i64, chrono::DateTime<chrono::Utc>)> = sqlx::query_as(
                "SELECT id, product_id, image, position, created_at FROM banners ORDER BY id",
            )
            .fetch_all(&state.pool)
            .await?;
            rows.into_iter()
                .map(|(id, product_id, image, position, created_at)| {
                    json!({
                        "id": id,
                        "product_id": product_id,
                        "image": image,
                        "position": position,
                        "created_at": created_at.to_rfc3339(),
                    })
                })
                .collect()
        }
        ResourceKind::Users => {
            let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY id")
                .fetch_all(&state.pool)
                .await?;
            rows.into_iter()
                .filter_map(|row| to_value(&row.into_user()))
                .collect()
        }
    };

    Ok(data)
}

/// Insert one resource row from a loose JSON payload and return the payload
/// merged with the assigned id. Users created this way get a placeholder
/// password; they are expected to reset it before logging in.
pub async fn create_resource(
    state: &AppState,
    kind: ResourceKind,
    body: Value,
) -> AppResult<Value> {
    let id = match kind {
        ResourceKind::Products => {
            let p = ProductPayload::from_value(&body);
            sqlx::query(
                "INSERT INTO products (name, price, short_description, long_description, sku, \
                 discount, images, category_id, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&p.name)
            .bind(p.price)
            .bind(&p.short_description)
            .bind(&p.long_description)
            .bind(&p.sku)
            .bind(p.discount)
            .bind(&p.images)
            .bind(p.category_id)
            .bind(p.created_at)
            .bind(p.updated_at)
            .execute(&state.pool)
            .await?
            .last_insert_rowid()
        }
        ResourceKind::Categories => {
            let c = CategoryPayload::from_value(&body);
            sqlx::query("INSERT INTO categories (name, alias) VALUES (?, ?)")
                .bind(&c.name)
                .bind(&c.alias)
                .execute(&state.pool)
                .await?
                .last_insert_rowid()
        }
        ResourceKind::Orders => {
            let o = OrderPayload::from_value(&body);
            sqlx::query(
                "INSERT INTO orders (user_id, product_ids, status, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(o.user_id)
            .bind(&o.product_ids)
            .bind(&o.status)
            .bind(o.created_at)
            .execute(&state.pool)
            .await?
            .last_insert_rowid()
        }
        ResourceKind::News => {
            let n = NewsPayload::from_value(&body);
            sqlx::query(
                "INSERT INTO news (title, description, image, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(&n.title)
            .bind(&n.description)
            .bind(&n.image)
            .bind(n.created_at)
            .execute(&state.pool)
            .await?
            .last_insert_rowid()
        }
        ResourceKind::Banners => {
            let b = BannerPayload::from_value(&body);
            sqlx::query(
                "INSERT INTO banners (product_id, image, position, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(b.product_id)
            .bind(&b.image)
            .bind(b.position)
            .bind(b.created_at)
            .execute(&state.pool)
            .await?
            .last_insert_rowid()
        }
        ResourceKind::Users => {
            let u = UserPayload::from_value(&body);
            let password = auth_service::hash_password("changeme")?;
            sqlx::query(
                "INSERT INTO users (email, password, role, name, phone, delivery_address, \
                 created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&u.email)
            .bind(&password)
            .bind(&u.role)
            .bind(&u.name)
            .bind(&u.phone)
            .bind(&u.delivery_address)
            .bind(u.created_at)
            .bind(u.updated_at)
            .execute(&state.pool)
            .await?
            .last_insert_rowid()
        }
    };

    let mut echoed = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    echoed.insert("id".to_string(), json!(id));
    Ok(Value::Object(echoed))
}

/// Full-row update by id. An id that matches nothing still reports success;
/// the admin panel treats updates as idempotent.
pub async fn update_resource(
    state: &AppState,
    kind: ResourceKind,
    id: i64,
    body: Value,
) -> AppResult<()> {
    match kind {
        ResourceKind::Products => {
            let p = ProductPayload::from_value(&body);
            sqlx::query(
                "UPDATE products SET name = ?, price = ?, short_description = ?, \
                 long_description = ?, sku = ?, discount = ?, images = ?, category_id = ?, \
                 updated_at = ? WHERE id = ?",
            )
            .bind(&p.name)
            .bind(p.price)
            .bind(&p.short_description)
            .bind(&p.long_description)
            .bind(&p.sku)
            .bind(p.discount)
            .bind(&p.images)
            .bind(p.category_id)
            .bind(p.updated_at)
            .bind(id)
            .execute(&state.pool)
            .await?;
        }
        ResourceKind::Categories => {
            let c = CategoryPayload::from_value(&body);
            sqlx::query("UPDATE categories SET name = ?, alias = ? WHERE id = ?")
                .bind(&c.name)
                .bind(&c.alias)
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Orders => {
            let o = OrderPayload::from_value(&body);
            sqlx::query("UPDATE orders SET user_id = ?, product_ids = ?, status = ? WHERE id = ?")
                .bind(o.user_id)
                .bind(&o.product_ids)
                .bind(&o.status)
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::News => {
            let n = NewsPayload::from_value(&body);
            sqlx::query("UPDATE news SET title = ?, description = ?, image = ? WHERE id = ?")
                .bind(&n.title)
                .bind(&n.description)
                .bind(&n.image)
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Banners => {
            let b = BannerPayload::from_value(&body);
            sqlx::query("UPDATE banners SET product_id = ?, image = ?, position = ? WHERE id = ?")
                .bind(b.product_id)
                .bind(&b.image)
                .bind(b.position)
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Users => {
            let u = UserPayload::from_value(&body);
            sqlx::query(
                "UPDATE users SET email = ?, role = ?, name = ?, phone = ?, \
                 delivery_address = ?, updated_at = ? WHERE id = ?",
            )
            .bind(&u.email)
            .bind(&u.role)
            .bind(&u.name)
            .bind(&u.phone)
            .bind(&u.delivery_address)
            .bind(u.updated_at)
            .bind(id)
            .execute(&state.pool)
            .await?;
        }
    }

    Ok(())
}

/// Delete a resource row. Product deletion also removes the reviews and
/// banners that reference it, in one transaction.
pub async fn delete_resource(state: &AppState, kind: ResourceKind, id: i64) -> AppResult<()> {
    match kind {
        ResourceKind::Products => {
            let mut tx = state.pool.begin().await?;
            sqlx::query("DELETE FROM reviews WHERE product_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM banners WHERE product_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM products WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
        }
        ResourceKind::Categories => {
            sqlx::query("DELETE FROM categories WHERE id = ?")
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Orders => {
            sqlx::query("DELETE FROM orders WHERE id = ?")
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::News => {
            sqlx::query("DELETE FROM news WHERE id = ?")
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Banners => {
            sqlx::query("DELETE FROM banners WHERE id = ?")
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
        ResourceKind::Users => {
            sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_map_to_kinds() {
        assert_eq!("products".parse::<ResourceKind>().unwrap(), ResourceKind::Products);
        assert_eq!("users".parse::<ResourceKind>().unwrap(), ResourceKind::Users);
        assert!("payments".parse::<ResourceKind>().is_err());
        assert!("Products".parse::<ResourceKind>().is_err());
    }
}
