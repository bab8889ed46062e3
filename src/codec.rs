//! Entity codec: converts loosely-typed admin payloads (arbitrary JSON maps)
//! into the typed column sets the storage layer needs, and handles the
//! serialized-list columns (`images`, `product_ids`).
//!
//! Coercion is deliberately permissive: absent or mistyped numbers become
//! zero, absent text becomes the empty string, unparseable timestamps fall
//! back to the current server time. The serialized form of list columns
//! never leaves this module.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Coerce any JSON value into a string column. Whole numbers render without
/// a fractional part; structured values are stored as their JSON text.
pub fn coerce_str(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            } else {
                n.to_string()
            }
        }
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn coerce_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Accepts RFC 3339 as well as the `datetime-local` shapes browsers emit.
/// Absence or a parse failure substitutes the current server time.
pub fn coerce_timestamp(value: Option<&Value>) -> DateTime<Utc> {
    let s = coerce_str(value);
    if s.is_empty() {
        return Utc::now();
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(&s) {
        return t.with_timezone(&Utc);
    }

    const LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for layout in LAYOUTS {
        if let Ok(t) = NaiveDateTime::parse_from_str(&s, layout) {
            return t.and_utc();
        }
    }

    Utc::now()
}

/// Coerce a list-valued field into its serialized-text column form. Accepts
/// an already-encoded string or a JSON array; anything else becomes the
/// empty-list encoding, never NULL.
pub fn coerce_list_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(arr @ Value::Array(_)) => arr.to_string(),
        _ => "[]".to_string(),
    }
}

pub fn encode_id_list(ids: &[i64]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a serialized id-list column. Callers that feed the result into
/// further lookups (order product resolution) must treat an error as fatal
/// for that response.
pub fn decode_id_list(raw: &str) -> Result<Vec<i64>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

pub fn decode_string_list(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Typed column set for a product write. One decoded variant per resource
/// kind replaces the original free-form map plumbing.
#[derive(Debug)]
pub struct ProductPayload {
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
}

impl ProductPayload {
    pub fn from_value(body: &Value) -> Self {
        Self {
            name: coerce_str(body.get("name")),
            price: coerce_f64(body.get("price")),
            short_description: coerce_str(body.get("short_description")),
            long_description: coerce_str(body.get("long_description")),
            sku: coerce_str(body.get("sku")),
            discount: coerce_i64(body.get("discount")),
            images: coerce_list_text(body.get("images")),
            category_id: coerce_i64(body.get("category_id")),
            created_at: coerce_timestamp(body.get("created_at")),
            updated_at: coerce_timestamp(body.get("updated_at")),
        }
    }
}

#[derive(Debug)]
pub struct CategoryPayload {
    pub name: String,
    pub alias: String,
}

impl CategoryPayload {
    pub fn from_value(body: &Value) -> Self {
        Self {
            name: coerce_str(body.get("name")),
            alias: coerce_str(body.get("alias")),
        }
    }
}

#[derive(Debug)]
pub struct OrderPayload {
    pub user_id: i64,
    pub product_ids: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl OrderPayload {
    pub fn from_value(body: &Value) -> Self {
        let mut status = coerce_str(body.get("status"));
        if status.is_empty() {
            status = "new".to_string();
        }
        Self {
            user_id: coerce_i64(body.get("user_id")),
            product_ids: coerce_list_text(body.get("product_ids")),
            status,
            created_at: coerce_timestamp(body.get("created_at")),
        }
    }
}

#[derive(Debug)]
pub struct NewsPayload {
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl NewsPayload {
    pub fn from_value(body: &Value) -> Self {
        Self {
            title: coerce_str(body.get("title")),
            description: coerce_str(body.get("description")),
            image: coerce_str(body.get("image")),
            created_at: coerce_timestamp(body.get("created_at")),
        }
    }
}

#[derive(Debug)]
pub struct BannerPayload {
    pub product_id: i64,
    pub image: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl BannerPayload {
    pub fn from_value(body: &Value) -> Self {
        Self {
            product_id: coerce_i64(body.get("product_id")),
            image: coerce_str(body.get("image")),
            position: coerce_i64(body.get("position")),
            created_at: coerce_timestamp(body.get("created_at")),
        }
    }
}

#[derive(Debug)]
pub struct UserPayload {
    pub email: String,
    pub role: String,
    pub name: String,
    pub phone: String,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPayload {
    pub fn from_value(body: &Value) -> Self {
        let mut role = coerce_str(body.get("role"));
        if role.is_empty() {
            role = "user".to_string();
        }
        Self {
            email: coerce_str(body.get("email")),
            role,
            name: coerce_str(body.get("name")),
            phone: coerce_str(body.get("phone")),
            delivery_address: coerce_str(body.get("delivery_address")),
            created_at: coerce_timestamp(body.get("created_at")),
            updated_at: coerce_timestamp(body.get("updated_at")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_coerce_from_numbers_and_null() {
        assert_eq!(coerce_str(Some(&json!("abc"))), "abc");
        assert_eq!(coerce_str(Some(&json!(12))), "12");
        assert_eq!(coerce_str(Some(&json!(12.0))), "12");
        assert_eq!(coerce_str(Some(&json!(12.5))), "12.5");
        assert_eq!(coerce_str(None), "");
        assert_eq!(coerce_str(Some(&Value::Null)), "");
    }

    #[test]
    fn numbers_coerce_from_strings_and_default_to_zero() {
        assert_eq!(coerce_i64(Some(&json!("42"))), 42);
        assert_eq!(coerce_i64(Some(&json!(7.9))), 7);
        assert_eq!(coerce_i64(Some(&json!("not a number"))), 0);
        assert_eq!(coerce_i64(None), 0);
        assert_eq!(coerce_f64(Some(&json!("2.5"))), 2.5);
        assert_eq!(coerce_f64(Some(&json!(true))), 0.0);
    }

    #[test]
    fn timestamps_accept_rfc3339_and_datetime_local() {
        let t = coerce_timestamp(Some(&json!("2024-03-01T10:30:00+00:00")));
        assert_eq!(t.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        let t = coerce_timestamp(Some(&json!("2024-03-01T10:30")));
        assert_eq!(t.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        // garbage falls back to "now" rather than failing
        let before = Utc::now();
        let t = coerce_timestamp(Some(&json!("yesterday-ish")));
        assert!(t >= before);
    }

    #[test]
    fn list_text_never_encodes_null() {
        assert_eq!(coerce_list_text(None), "[]");
        assert_eq!(coerce_list_text(Some(&json!(""))), "[]");
        assert_eq!(coerce_list_text(Some(&json!("[1,2]"))), "[1,2]");
        assert_eq!(coerce_list_text(Some(&json!([1, 2, 3]))), "[1,2,3]");
    }

    #[test]
    fn id_list_round_trip_preserves_order() {
        let encoded = encode_id_list(&[5, 9, 2]);
        assert_eq!(decode_id_list(&encoded).unwrap(), vec![5, 9, 2]);
        assert!(decode_id_list("not json").is_err());
        assert!(decode_id_list("").unwrap().is_empty());
    }

    #[test]
    fn order_payload_defaults_status_to_new() {
        let payload = OrderPayload::from_value(&json!({ "user_id": 3, "product_ids": [1] }));
        assert_eq!(payload.status, "new");
        assert_eq!(payload.user_id, 3);
        assert_eq!(payload.product_ids, "[1]");
    }

    #[test]
    fn user_payload_defaults_role() {
        let payload = UserPayload::from_value(&json!({ "email": "a@b.com" }));
        assert_eq!(payload.role, "user");
        assert_eq!(payload.name, "");
    }
}
