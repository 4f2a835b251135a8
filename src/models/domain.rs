use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;

/// A named subgroup of the club (a technical track) used to scope meetings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Domain {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub is_active: bool,
}

const SELECT_DOMAIN: &str = "SELECT id, name, display_name, description, logo, is_active FROM domains";

pub async fn find_active(pool: &PgPool) -> Result<Vec<Domain>, sqlx::Error> {
    let sql = format!("{SELECT_DOMAIN} WHERE is_active ORDER BY display_name, name");
    sqlx::query_as::<_, Domain>(&sql).fetch_all(pool).await
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Domain>, sqlx::Error> {
    let sql = format!("{SELECT_DOMAIN} WHERE is_active AND id = $1");
    sqlx::query_as::<_, Domain>(&sql).bind(id).fetch_optional(pool).await
}

/// Every domain keyed by id, including inactive ones still attached to meetings.
pub async fn find_all_by_id(pool: &PgPool) -> Result<HashMap<i64, Domain>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Domain>(SELECT_DOMAIN).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|d| (d.id, d)).collect())
}

/// Ids from `ids` that are not active domains.
pub async fn find_unknown_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT requested.id \
         FROM UNNEST($1::BIGINT[]) AS requested(id) \
         LEFT JOIN domains d ON d.id = requested.id AND d.is_active \
         WHERE d.id IS NULL \
         ORDER BY requested.id",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}
