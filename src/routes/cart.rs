use axum::{
    Json, Router,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::{
    dto::cart::{AddToCartRequest, CartEntry, RemoveFromCartRequest},
    error::{AppError, AppResult},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(add_to_cart))
        .route("/", axum::routing::get(get_cart))
        .route("/", axum::routing::delete(remove_from_cart))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CartQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added, quantity replaced if already present"),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Unknown user or product"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<Value>> {
    cart_service::add_to_cart(&state, payload).await?;
    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart contents with product details", body = [CartEntry]),
        (status = 400, description = "Email missing"),
        (status = 404, description = "Unknown user"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<Vec<CartEntry>>> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required".into()))?;
    let entries = cart_service::get_cart(&state, &email).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    request_body = RemoveFromCartRequest,
    responses(
        (status = 200, description = "Item removed; absent items are a no-op"),
        (status = 404, description = "Unknown user"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Json(payload): Json<RemoveFromCartRequest>,
) -> AppResult<Json<Value>> {
    cart_service::remove_from_cart(&state, payload).await?;
    Ok(Json(json!({ "success": true })))
}
