//! Append-only record of who changed what.
//!
//! Writes are best effort: callers log and continue when an entry cannot be
//! stored, so a broken audit table never blocks a meeting update.

use serde_json::Value;
use sqlx::PgPool;

/// Record one action. `user_id` is `None` for system actions such as seeding.
pub async fn log(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(action)
    .bind(target_type)
    .bind(target_id)
    .bind(details)
    .execute(pool)
    .await?;
    Ok(())
}

/// Like [`log`], but a failure is only reported in the server log.
pub async fn record(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) {
    if let Err(e) = log(pool, user_id, action, target_type, target_id, details).await {
        log::warn!("Failed to write audit entry {action} for {target_type} {target_id}: {e}");
    }
}

/// Delete entries older than `retention_days`. Returns the number removed.
pub async fn cleanup_old_entries(pool: &PgPool, retention_days: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM audit_log WHERE created_at < NOW() - make_interval(days => $1::INT)",
    )
    .bind(retention_days)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Most recent entries for one target, newest first.
pub async fn find_for_target(
    pool: &PgPool,
    target_type: &str,
    target_id: i64,
) -> Result<Vec<(String, Option<i64>, Value)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT action, user_id, details FROM audit_log \
         WHERE target_type = $1 AND target_id = $2 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_all(pool)
    .await
}
