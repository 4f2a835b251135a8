use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use super::types::{Meeting, MeetingFields};
use crate::models::schedule::ScheduleStatus;

/// Meeting columns, scheduler and speaker names, and the domain set
/// aggregated into a sorted array (empty when the meeting is for everyone).
const MEETING_SELECT: &str = "\
SELECT m.id, m.title, m.description, \
       m.speaker_id, sp.name AS speaker_name, m.speaker_other, \
       m.scheduled_by, sb.name AS scheduled_by_name, \
       m.scheduled_date, m.end_time, m.meeting_link, m.location, \
       m.status, m.is_active, m.created_at, m.updated_at, \
       COALESCE( \
           ARRAY_AGG(md.domain_id ORDER BY md.domain_id) FILTER (WHERE md.domain_id IS NOT NULL), \
           '{}'::BIGINT[] \
       ) AS domain_ids \
FROM meetings m \
LEFT JOIN team_members sp ON sp.id = m.speaker_id \
LEFT JOIN team_members sb ON sb.id = m.scheduled_by \
LEFT JOIN meeting_domains md ON md.meeting_id = m.id";

const MEETING_GROUP_BY: &str = "GROUP BY m.id, sp.name, sb.name";

#[derive(sqlx::FromRow)]
struct MeetingRow {
    id: i64,
    title: String,
    description: Option<String>,
    speaker_id: Option<i64>,
    speaker_name: Option<String>,
    speaker_other: Option<String>,
    scheduled_by: Option<i64>,
    scheduled_by_name: Option<String>,
    scheduled_date: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    meeting_link: Option<String>,
    location: Option<String>,
    status: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    domain_ids: Vec<i64>,
}

impl From<MeetingRow> for Meeting {
    fn from(row: MeetingRow) -> Self {
        Meeting {
            id: row.id,
            title: row.title,
            description: row.description,
            speaker_id: row.speaker_id,
            speaker_name: row.speaker_name,
            speaker_other: row.speaker_other,
            scheduled_by: row.scheduled_by,
            scheduled_by_name: row.scheduled_by_name,
            scheduled_date: row.scheduled_date,
            end_time: row.end_time,
            meeting_link: row.meeting_link,
            location: row.location,
            // CHECK constraint on the column keeps this total.
            status: ScheduleStatus::parse(&row.status).unwrap_or(ScheduleStatus::Upcoming),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            domain_ids: row.domain_ids,
        }
    }
}

/// All active meetings, newest first.
pub async fn find_active(pool: &PgPool) -> Result<Vec<Meeting>, sqlx::Error> {
    let sql = format!(
        "{MEETING_SELECT} WHERE m.is_active {MEETING_GROUP_BY} ORDER BY m.scheduled_date DESC, m.id DESC"
    );
    let rows = sqlx::query_as::<_, MeetingRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Meeting::from).collect())
}

/// The active meeting with this id, if any. Inactive meetings are treated as missing.
pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Meeting>, sqlx::Error> {
    let sql = format!("{MEETING_SELECT} WHERE m.is_active AND m.id = $1 {MEETING_GROUP_BY}");
    let row = sqlx::query_as::<_, MeetingRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Meeting::from))
}

/// Active meetings scheduled by one team member, newest first.
pub async fn find_active_scheduled_by(
    pool: &PgPool,
    team_member_id: i64,
) -> Result<Vec<Meeting>, sqlx::Error> {
    let sql = format!(
        "{MEETING_SELECT} WHERE m.is_active AND m.scheduled_by = $1 {MEETING_GROUP_BY} \
         ORDER BY m.scheduled_date DESC, m.id DESC"
    );
    let rows = sqlx::query_as::<_, MeetingRow>(&sql)
        .bind(team_member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Meeting::from).collect())
}

async fn replace_domains(
    tx: &mut Transaction<'_, Postgres>,
    meeting_id: i64,
    domain_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM meeting_domains WHERE meeting_id = $1")
        .bind(meeting_id)
        .execute(&mut **tx)
        .await?;
    if !domain_ids.is_empty() {
        sqlx::query(
            "INSERT INTO meeting_domains (meeting_id, domain_id) \
             SELECT $1::BIGINT, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
        )
        .bind(meeting_id)
        .bind(domain_ids)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Insert a meeting and its domain set in one transaction. Returns the new id.
pub async fn create(pool: &PgPool, fields: &MeetingFields) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO meetings \
             (title, description, speaker_id, speaker_other, scheduled_by, scheduled_date, \
              end_time, meeting_link, location, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id",
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.speaker_id)
    .bind(&fields.speaker_other)
    .bind(fields.scheduled_by)
    .bind(fields.scheduled_date)
    .bind(fields.end_time)
    .bind(&fields.meeting_link)
    .bind(&fields.location)
    .bind(fields.status.as_str())
    .fetch_one(&mut *tx)
    .await?;
    replace_domains(&mut tx, id, &fields.domain_ids).await?;
    tx.commit().await?;
    Ok(id)
}

/// Overwrite an active meeting and its domain set in one transaction.
/// Returns false when the meeting is missing or inactive.
pub async fn update(pool: &PgPool, id: i64, fields: &MeetingFields) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE meetings SET \
             title = $2, description = $3, speaker_id = $4, speaker_other = $5, \
             scheduled_by = $6, scheduled_date = $7, end_time = $8, meeting_link = $9, \
             location = $10, status = $11, updated_at = NOW() \
         WHERE id = $1 AND is_active",
    )
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.speaker_id)
    .bind(&fields.speaker_other)
    .bind(fields.scheduled_by)
    .bind(fields.scheduled_date)
    .bind(fields.end_time)
    .bind(&fields.meeting_link)
    .bind(&fields.location)
    .bind(fields.status.as_str())
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }
    replace_domains(&mut tx, id, &fields.domain_ids).await?;
    tx.commit().await?;
    Ok(true)
}

/// Soft delete. Returns false when the meeting was already inactive or missing.
pub async fn deactivate(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE meetings SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
