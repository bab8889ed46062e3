//! Row types at the storage edge. Serialized-list columns are decoded here
//! and nowhere else.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{
    codec,
    models::{Category, Product, User},
};

/// Products are always read together with their category.
pub const PRODUCT_SELECT: &str = "SELECT p.id, p.name, p.price, p.short_description, \
     p.long_description, p.sku, p.discount, p.images, p.category_id, \
     p.created_at, p.updated_at, c.id AS cat_id, c.name AS cat_name, c.alias AS cat_alias \
     FROM products p JOIN categories c ON p.category_id = c.id";

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub short_description: String,
    pub long_description: String,
    pub sku: String,
    pub discount: i64,
    pub images: String,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cat_id: i64,
    pub cat_name: String,
    pub cat_alias: String,
}

impl ProductRow {
    pub fn into_product(self) -> Result<Product, serde_json::Error> {
        let images = codec::decode_string_list(&self.images)?;
        Ok(Product {
            id: self.id,
            name: self.name,
            price: self.price,
            short_description: self.short_description,
            long_description: self.long_description,
            sku: self.sku,
            discount: self.discount,
            images,
            category_id: self.category_id,
            category: Some(Category {
                id: self.cat_id,
                name: self.cat_name,
                alias: self.cat_alias,
            }),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: String,
    pub name: String,
    pub phone: String,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// The password hash stays behind; it is not part of the response model.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            role: self.role,
            name: self.name,
            phone: self.phone,
            delivery_address: self.delivery_address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub product_ids: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
