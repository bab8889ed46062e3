use axum::{
    Json, Router,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;

use crate::{
    dto::favorites::SaveFavoritesRequest,
    error::{AppError, AppResult},
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(save_favorites))
        .route("/", axum::routing::get(get_favorites))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FavoritesQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = SaveFavoritesRequest,
    responses(
        (status = 200, description = "Favorites replaced"),
        (status = 404, description = "Unknown user"),
    ),
    tag = "Favorites"
)]
pub async fn save_favorites(
    State(state): State<AppState>,
    Json(payload): Json<SaveFavoritesRequest>,
) -> AppResult<Json<Value>> {
    favorite_service::save_favorites(&state, &payload.email, &payload.product_ids).await?;
    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    params(FavoritesQuery),
    responses(
        (status = 200, description = "Saved product ids in saved order", body = [i64]),
        (status = 400, description = "Email missing"),
        (status = 404, description = "Unknown user"),
    ),
    tag = "Favorites"
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    Query(query): Query<FavoritesQuery>,
) -> AppResult<Json<Vec<i64>>> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required".into()))?;
    let ids = favorite_service::get_favorites(&state, &email).await?;
    Ok(Json(ids))
}
