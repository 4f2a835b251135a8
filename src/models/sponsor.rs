use chrono::NaiveDate;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub collaboration_agenda: String,
    pub collaboration_date: NaiveDate,
    pub is_active: bool,
    pub sort_order: i32,
}

const SELECT_SPONSOR: &str = "\
    SELECT id, name, logo, website, collaboration_agenda, collaboration_date, is_active, sort_order \
    FROM sponsors";

/// Active sponsors, lowest display order first, then most recent collaboration.
pub async fn find_active(pool: &PgPool) -> Result<Vec<Sponsor>, sqlx::Error> {
    let sql = format!("{SELECT_SPONSOR} WHERE is_active ORDER BY sort_order, collaboration_date DESC");
    sqlx::query_as::<_, Sponsor>(&sql).fetch_all(pool).await
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Sponsor>, sqlx::Error> {
    let sql = format!("{SELECT_SPONSOR} WHERE is_active AND id = $1");
    sqlx::query_as::<_, Sponsor>(&sql).bind(id).fetch_optional(pool).await
}
