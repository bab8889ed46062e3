use chrono::Utc;

use crate::{
    codec,
    error::{AppError, AppResult},
    services::auth_service,
    state::AppState,
};

/// One favorites record per user, replaced wholesale on every save.
pub async fn save_favorites(state: &AppState, email: &str, product_ids: &[i64]) -> AppResult<()> {
    let user_id = auth_service::lookup_user_id(&state.pool, email)
        .await?
        .ok_or(AppError::NotFound)?;

    sqlx::query(
        "INSERT INTO favorites (user_id, product_ids, updated_at) VALUES (?, ?, ?) \
         ON CONFLICT(user_id) \
         DO UPDATE SET product_ids = excluded.product_ids, updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(codec::encode_id_list(product_ids))
    .bind(Utc::now())
    .execute(&state.pool)
    .await?;

    Ok(())
}

/// Returns the saved id list in its original order; no record means an
/// empty list, not an error.
pub async fn get_favorites(state: &AppState, email: &str) -> AppResult<Vec<i64>> {
    let user_id = auth_service::lookup_user_id(&state.pool, email)
        .await?
        .ok_or(AppError::NotFound)?;

    let raw = sqlx::query_scalar::<_, String>("SELECT product_ids FROM favorites WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await?;

    match raw {
        None => Ok(Vec::new()),
        Some(raw) => codec::decode_id_list(&raw)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt favorites list: {e}"))),
    }
}
