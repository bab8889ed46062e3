use axum::{Json, Router, extract::State};

use crate::{
    dto::content::BannerListResponse,
    error::AppResult,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", axum::routing::get(list_banners))
}

#[utoipa::path(
    get,
    path = "/api/banners",
    responses(
        (status = 200, description = "Banners by position with resolved products", body = BannerListResponse),
    ),
    tag = "Content"
)]
pub async fn list_banners(State(state): State<AppState>) -> AppResult<Json<BannerListResponse>> {
    let banners = content_service::list_banners(&state).await?;
    Ok(Json(BannerListResponse { banners }))
}
