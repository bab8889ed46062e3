use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use storefront_api::{config::AppConfig, db::{DbPool, create_pool}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user_with_role(&pool, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user_with_role(&pool, "user@example.com", "user123", "user").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user_with_role(
    pool: &DbPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<i64> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let now = Utc::now();
    sqlx::query(
        "INSERT INTO users (email, password, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT (email) DO UPDATE SET role = excluded.role",
    )
    .bind(email)
    .bind(&password_hash)
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}

async fn seed_catalog(pool: &DbPool) -> anyhow::Result<()> {
    let categories = [("Rings", "rings"), ("Earrings", "earrings"), ("Pendants", "pendants")];
    for (name, alias) in categories {
        sqlx::query("INSERT INTO categories (name, alias) VALUES (?, ?) ON CONFLICT (alias) DO NOTHING")
            .bind(name)
            .bind(alias)
            .execute(pool)
            .await?;
    }

    let products = [
        ("Gold Ring", 199.0, "GR-001", "rings", 0_i64),
        ("Silver Ring", 89.0, "SR-001", "rings", 10),
        ("Pearl Earrings", 149.0, "PE-001", "earrings", 0),
        ("Ruby Pendant", 259.0, "RP-001", "pendants", 15),
    ];
    let now = Utc::now();
    for (name, price, sku, category_alias, discount) in products {
        let category_id: i64 = sqlx::query_scalar("SELECT id FROM categories WHERE alias = ?")
            .bind(category_alias)
            .fetch_one(pool)
            .await?;
        sqlx::query(
            "INSERT INTO products (name, price, short_description, long_description, sku, \
             discount, images, category_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, '[]', ?, ?, ?) \
             ON CONFLICT (sku) DO NOTHING",
        )
        .bind(name)
        .bind(price)
        .bind(format!("{name} from the demo catalog"))
        .bind(format!("{name}, seeded for local development."))
        .bind(sku)
        .bind(discount)
        .bind(category_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
    }

    println!("Seeded {} categories and {} products", categories.len(), products.len());
    Ok(())
}
