use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    dto::admin::{
        BackupCreatedResponse, BackupListResponse, DeleteResponse, ResourceListResponse,
        RestoreRequest, RestoreResponse, UploadResponse,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    services::{admin_service, admin_service::ResourceKind, backup_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/backup", axum::routing::post(create_backup))
        .route("/backups", axum::routing::get(list_backups))
        .route("/restore", axum::routing::post(restore_backup))
        .route("/upload/{kind}", axum::routing::post(upload_image))
        .route("/{resource}", axum::routing::get(list_resource))
        .route("/{resource}", axum::routing::post(create_resource))
        .route("/{resource}/{id}", axum::routing::put(update_resource))
        .route("/{resource}/{id}", axum::routing::delete(delete_resource))
}

#[utoipa::path(
    get,
    path = "/api/admin/{resource}",
    params(("resource" = String, Path, description = "One of products, categories, orders, news, banners, users")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every row of the resource", body = ResourceListResponse),
        (status = 400, description = "Unknown resource"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn list_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path(resource): Path<String>,
) -> AppResult<Json<ResourceListResponse>> {
    ensure_admin(&user)?;
    let kind: ResourceKind = resource.parse()?;
    let data = admin_service::list_resource(&state, kind).await?;
    Ok(Json(ResourceListResponse { data }))
}

#[utoipa::path(
    post,
    path = "/api/admin/{resource}",
    params(("resource" = String, Path, description = "Resource name")),
    request_body = Value,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Row created; echoes the payload with its id", body = Value),
        (status = 400, description = "Unknown resource"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn create_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    ensure_admin(&user)?;
    let kind: ResourceKind = resource.parse()?;
    let created = admin_service::create_resource(&state, kind, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/admin/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource name"),
        ("id" = i64, Path, description = "Row id"),
    ),
    request_body = Value,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Row updated (or nothing matched the id)"),
        (status = 400, description = "Unknown resource"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn update_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    ensure_admin(&user)?;
    let kind: ResourceKind = resource.parse()?;
    admin_service::update_resource(&state, kind, id, body).await?;
    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Resource name"),
        ("id" = i64, Path, description = "Row id"),
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Row deleted; products also drop their reviews and banners", body = DeleteResponse),
        (status = 400, description = "Unknown resource"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource, id)): Path<(String, i64)>,
) -> AppResult<Json<DeleteResponse>> {
    ensure_admin(&user)?;
    let kind: ResourceKind = resource.parse()?;
    admin_service::delete_resource(&state, kind, id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/admin/backup",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Snapshot written", body = BackupCreatedResponse),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn create_backup(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<BackupCreatedResponse>> {
    ensure_admin(&user)?;
    let path = backup_service::create_backup(&state).await?;
    Ok(Json(BackupCreatedResponse {
        success: true,
        path,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/backups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available snapshots, newest first", body = BackupListResponse),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn list_backups(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<BackupListResponse>> {
    ensure_admin(&user)?;
    let backups = backup_service::list_backups(&state).await?;
    Ok(Json(BackupListResponse { backups }))
}

#[utoipa::path(
    post,
    path = "/api/admin/restore",
    request_body = RestoreRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Database file replaced with the snapshot", body = RestoreResponse),
        (status = 400, description = "Unknown snapshot or path outside the backup directory"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn restore_backup(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RestoreRequest>,
) -> AppResult<Json<RestoreResponse>> {
    ensure_admin(&user)?;
    let message = backup_service::restore_backup(&state, &payload.backup_name).await?;
    Ok(Json(RestoreResponse {
        success: true,
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/upload/{kind}",
    params(("kind" = String, Path, description = "One of products, news, banners")),
    request_body(content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "File stored; returns its public path", body = UploadResponse),
        (status = 400, description = "Unknown kind or no file field"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    ensure_admin(&user)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let path = backup_service::save_upload(&state, &kind, &original_name, &bytes).await?;
        return Ok(Json(UploadResponse { path }));
    }

    Err(AppError::BadRequest("file field is required".into()))
}
