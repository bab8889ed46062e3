use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Path of the database file itself, used by the backup/restore endpoints.
    pub database_file: String,
    pub backup_dir: String,
    pub images_dir: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_file = env::var("DATABASE_FILE").unwrap_or_else(|_| "app.db".to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| format!("sqlite://{database_file}"));
        let backup_dir = env::var("BACKUP_DIR").unwrap_or_else(|_| "backups".to_string());
        let images_dir = env::var("IMAGES_DIR").unwrap_or_else(|_| "images".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            database_url,
            database_file,
            backup_dir,
            images_dir,
            host,
            port,
        })
    }
}
