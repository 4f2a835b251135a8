use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// Site-wide settings. The table holds at most one row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SiteSettings {
    pub id: i64,
    pub club_name: String,
    pub club_full_name: String,
    pub club_motto: String,
    pub club_logo: Option<String>,
    pub university_logo: Option<String>,
    pub hero_background: Option<String>,
    pub updated_at: DateTime<Utc>,
}

const SELECT_SETTINGS: &str = "\
    SELECT id, club_name, club_full_name, club_motto, club_logo, university_logo, \
           hero_background, updated_at \
    FROM site_settings";

pub async fn find_all(pool: &PgPool) -> Result<Vec<SiteSettings>, sqlx::Error> {
    let sql = format!("{SELECT_SETTINGS} ORDER BY id");
    sqlx::query_as::<_, SiteSettings>(&sql).fetch_all(pool).await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<SiteSettings>, sqlx::Error> {
    let sql = format!("{SELECT_SETTINGS} WHERE id = $1");
    sqlx::query_as::<_, SiteSettings>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn find_current(pool: &PgPool) -> Result<Option<SiteSettings>, sqlx::Error> {
    let sql = format!("{SELECT_SETTINGS} ORDER BY id LIMIT 1");
    sqlx::query_as::<_, SiteSettings>(&sql).fetch_optional(pool).await
}

/// Insert the default settings row unless one already exists. Returns true if inserted.
pub async fn ensure_default(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("INSERT INTO site_settings DEFAULT VALUES ON CONFLICT DO NOTHING")
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
