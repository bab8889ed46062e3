//! Database file backup/restore and image uploads. Everything here touches
//! the filesystem through tokio, never the pool.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::admin::BackupInfo,
    error::{AppError, AppResult},
    state::AppState,
};

fn timestamped_name(prefix: &str) -> String {
    format!("{prefix}-{}.db", Utc::now().format("%Y%m%d-%H%M%S"))
}

/// Copy the live database file into the backup directory and return the
/// path of the new snapshot.
pub async fn create_backup(state: &AppState) -> AppResult<String> {
    let backup_dir = Path::new(&state.config.backup_dir);
    tokio::fs::create_dir_all(backup_dir)
        .await
        .map_err(anyhow::Error::from)?;

    let dst = backup_dir.join(timestamped_name("backup"));
    tokio::fs::copy(&state.config.database_file, &dst)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(dst.to_string_lossy().into_owned())
}

/// List the `.db` snapshots in the backup directory, newest metadata and
/// all. A missing directory means no backups yet, not an error.
pub async fn list_backups(state: &AppState) -> AppResult<Vec<BackupInfo>> {
    let backup_dir = Path::new(&state.config.backup_dir);
    let mut entries = match tokio::fs::read_dir(backup_dir).await {
        Ok(entries) => entries,
        Err(_) => return Ok(Vec::new()),
    };

    let mut backups = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(anyhow::Error::from)? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("db") {
            continue;
        }
        let meta = entry.metadata().await.map_err(anyhow::Error::from)?;
        if !meta.is_file() {
            continue;
        }
        let modified: DateTime<Utc> = meta
            .modified()
            .map_err(anyhow::Error::from)?
            .into();
        backups.push(BackupInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: path.to_string_lossy().into_owned(),
            modified: modified.format("%Y-%m-%d %H:%M:%S").to_string(),
            size: meta.len(),
        });
    }

    backups.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(backups)
}

/// Resolve a backup name against the backup directory, refusing anything
/// that escapes it.
async fn resolve_backup_path(backup_dir: &Path, name: &str) -> AppResult<PathBuf> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(AppError::BadRequest("invalid backup path".into()));
    }

    let candidate = backup_dir.join(name);
    let dir = tokio::fs::canonicalize(backup_dir)
        .await
        .map_err(|_| AppError::BadRequest("backup file not found".into()))?;
    let resolved = tokio::fs::canonicalize(&candidate)
        .await
        .map_err(|_| AppError::BadRequest("backup file not found".into()))?;
    if !resolved.starts_with(&dir) {
        return Err(AppError::BadRequest("invalid backup path".into()));
    }

    Ok(resolved)
}

/// Replace the live database file with a named snapshot. The current file
/// is snapshotted first so a bad restore is itself recoverable.
pub async fn restore_backup(state: &AppState, backup_name: &str) -> AppResult<String> {
    let backup_dir = Path::new(&state.config.backup_dir);
    let source = resolve_backup_path(backup_dir, backup_name).await?;

    let safety = backup_dir.join(timestamped_name("backup-before-restore"));
    tokio::fs::copy(&state.config.database_file, &safety)
        .await
        .map_err(anyhow::Error::from)?;

    tokio::fs::copy(&source, &state.config.database_file)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(format!("restored from {backup_name}"))
}

fn upload_folder(kind: &str) -> AppResult<&'static str> {
    match kind {
        "products" => Ok("jewelry"),
        "news" => Ok("news"),
        "banners" => Ok("banner"),
        _ => Err(AppError::BadRequest("unknown upload kind".into())),
    }
}

/// Store an uploaded image under the folder for its kind and return the
/// public path it will be served from.
pub async fn save_upload(
    state: &AppState,
    kind: &str,
    original_name: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let folder = upload_folder(kind)?;

    // keep only the final path component of whatever the client sent
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let file_name = format!("{}_{base}", Uuid::new_v4());

    let dir = Path::new(&state.config.images_dir).join(folder);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(anyhow::Error::from)?;
    tokio::fs::write(dir.join(&file_name), bytes)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(format!("/images/{folder}/{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_kinds_map_to_folders() {
        assert_eq!(upload_folder("products").unwrap(), "jewelry");
        assert_eq!(upload_folder("news").unwrap(), "news");
        assert_eq!(upload_folder("banners").unwrap(), "banner");
        assert!(upload_folder("avatars").is_err());
    }

    #[test]
    fn snapshot_names_carry_a_timestamp() {
        let name = timestamped_name("backup");
        assert!(name.starts_with("backup-"));
        assert!(name.ends_with(".db"));
    }
}
