use axum::{Json, Router, extract::State};

use crate::{error::AppResult, models::News, services::content_service, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", axum::routing::get(list_news))
}

#[utoipa::path(
    get,
    path = "/api/news",
    responses(
        (status = 200, description = "News items, newest first", body = [News]),
    ),
    tag = "Content"
)]
pub async fn list_news(State(state): State<AppState>) -> AppResult<Json<Vec<News>>> {
    let news = content_service::list_news(&state).await?;
    Ok(Json(news))
}
