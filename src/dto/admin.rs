use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceListResponse {
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BackupCreatedResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BackupInfo {
    pub name: String,
    pub path: String,
    pub modified: String,
    pub size: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BackupListResponse {
    pub backups: Vec<BackupInfo>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestoreRequest {
    pub backup_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestoreResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub path: String,
}
