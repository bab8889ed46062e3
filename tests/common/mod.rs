use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use storefront_api::{config::AppConfig, state::AppState};

pub struct TestApp {
    pub state: AppState,
    // Holds the backup/images directories alive for the test's duration.
    pub tmp: tempfile::TempDir,
}

/// Fresh in-memory database with migrations applied. A single connection is
/// used so every query sees the same database.
pub async fn setup() -> anyhow::Result<TestApp> {
    unsafe {
        std::env::set_var("JWT_SECRET", "test-secret");
    }

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let tmp = tempfile::tempdir()?;
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        database_file: tmp.path().join("app.db").to_string_lossy().into_owned(),
        backup_dir: tmp.path().join("backups").to_string_lossy().into_owned(),
        images_dir: tmp.path().join("images").to_string_lossy().into_owned(),
        host: "127.0.0.1".to_string(),
        port: 0,
    };

    Ok(TestApp {
        state: AppState { pool, config },
        tmp,
    })
}

pub async fn create_user(state: &AppState, email: &str, role: &str) -> anyhow::Result<i64> {
    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO users (email, password, role, created_at, updated_at) VALUES (?, 'x', ?, ?, ?)",
    )
    .bind(email)
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

pub async fn create_category(state: &AppState, name: &str, alias: &str) -> anyhow::Result<i64> {
    let id = sqlx::query("INSERT INTO categories (name, alias) VALUES (?, ?)")
        .bind(name)
        .bind(alias)
        .execute(&state.pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

pub async fn create_product(
    state: &AppState,
    name: &str,
    price: f64,
    sku: &str,
    category_id: i64,
    discount: i64,
) -> anyhow::Result<i64> {
    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO products (name, price, short_description, long_description, sku, discount, \
         images, category_id, created_at, updated_at) VALUES (?, ?, '', '', ?, ?, '[]', ?, ?, ?)",
    )
    .bind(name)
    .bind(price)
    .bind(sku)
    .bind(discount)
    .bind(category_id)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}
