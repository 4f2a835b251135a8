use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{site_settings, user};

pub async fn init_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// First-run data: the site settings row, and a staff `admin` account when
/// the users table is empty and `SEED_ADMIN_PASSWORD` is set.
pub async fn seed(pool: &PgPool, config: &AppConfig) -> Result<(), AppError> {
    if site_settings::ensure_default(pool).await? {
        log::info!("Seeded default site settings");
    }

    if user::count(pool).await? > 0 {
        return Ok(());
    }
    let Some(admin_password) = config.seed_admin_password.as_deref() else {
        log::warn!("No users exist and SEED_ADMIN_PASSWORD is unset; skipping admin seed");
        return Ok(());
    };

    let password_hash = password::hash_password(admin_password).map_err(AppError::Hash)?;
    let admin = user::NewUser {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password_hash,
        first_name: String::new(),
        last_name: String::new(),
    };
    let id = user::create_staff(pool, &admin).await?;
    log::info!("Seeded staff user admin ({id})");
    crate::audit::record(pool, None, "user.seeded", "user", id, serde_json::json!({ "username": "admin" })).await;
    Ok(())
}
