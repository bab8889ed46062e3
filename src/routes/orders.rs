use axum::{Json, Router, extract::State, http::StatusCode};

use crate::{
    dto::orders::{CreateOrderAuthRequest, CreateOrderRequest, OrderListResponse, OrderResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_order))
        .route("/", axum::routing::get(list_orders))
        .route("/auth", axum::routing::post(create_order_authenticated))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed, account created", body = OrderResponse),
        (status = 400, description = "No product ids, or email already registered"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let response = order_service::create_guest_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/auth",
    request_body = CreateOrderAuthRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order placed for the authenticated user", body = OrderResponse),
        (status = 400, description = "No product ids"),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "Orders"
)]
pub async fn create_order_authenticated(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderAuthRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let response = order_service::create_auth_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's orders, newest first", body = OrderListResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<OrderListResponse>> {
    let orders = order_service::list_user_orders(&state, user.user_id).await?;
    Ok(Json(OrderListResponse { orders }))
}
