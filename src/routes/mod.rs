use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod banners;
pub mod cart;
pub mod categories;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod news;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/banners", banners::router())
        .nest("/news", news::router())
        .nest("/orders", orders::router())
        .nest("/cart", cart::router())
        .nest("/favorites", favorites::router())
        .nest("/admin", admin::router())
}
