use axum::{Json, Router, extract::State};

use crate::{
    dto::content::CategoryListResponse,
    error::AppResult,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", axum::routing::get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories, alphabetical", body = CategoryListResponse),
    ),
    tag = "Content"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoryListResponse>> {
    let categories = content_service::list_categories(&state).await?;
    Ok(Json(CategoryListResponse { categories }))
}
