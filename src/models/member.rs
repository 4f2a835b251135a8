use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::domain::Domain;
use super::team_member::TeamRole;

/// Short reference to a team member, used for a member's lead.
#[derive(Debug, Clone)]
pub struct LeadRef {
    pub id: i64,
    pub name: String,
    pub role: TeamRole,
    pub position: String,
}

/// A regular club member with their domain and lead resolved.
#[derive(Debug, Clone)]
pub struct MemberDetail {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub domain: Option<Domain>,
    pub lead: Option<LeadRef>,
    pub phone_number: Option<String>,
    pub personal_mail: Option<String>,
    pub gla_mail: Option<String>,
    pub university_roll: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    user_id: Option<i64>,
    username: Option<String>,
    domain_id: Option<i64>,
    domain_name: Option<String>,
    domain_display_name: Option<String>,
    domain_description: Option<String>,
    domain_logo: Option<String>,
    domain_is_active: Option<bool>,
    lead_id: Option<i64>,
    lead_name: Option<String>,
    lead_role: Option<String>,
    lead_position: Option<String>,
    phone_number: Option<String>,
    personal_mail: Option<String>,
    gla_mail: Option<String>,
    university_roll: Option<String>,
    linkedin_url: Option<String>,
    github_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for MemberDetail {
    fn from(row: MemberRow) -> Self {
        let domain = row.domain_id.map(|id| Domain {
            id,
            name: row.domain_name.unwrap_or_default(),
            display_name: row.domain_display_name.unwrap_or_default(),
            description: row.domain_description,
            logo: row.domain_logo,
            is_active: row.domain_is_active.unwrap_or(false),
        });
        let lead = row.lead_id.map(|id| LeadRef {
            id,
            name: row.lead_name.unwrap_or_default(),
            role: row
                .lead_role
                .as_deref()
                .and_then(TeamRole::parse)
                .unwrap_or(TeamRole::Lead),
            position: row.lead_position.unwrap_or_default(),
        });
        MemberDetail {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            domain,
            lead,
            phone_number: row.phone_number,
            personal_mail: row.personal_mail,
            gla_mail: row.gla_mail,
            university_roll: row.university_roll,
            linkedin_url: row.linkedin_url,
            github_url: row.github_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_MEMBER: &str = "\
    SELECT m.id, m.user_id, u.username, \
           d.id AS domain_id, d.name AS domain_name, d.display_name AS domain_display_name, \
           d.description AS domain_description, d.logo AS domain_logo, d.is_active AS domain_is_active, \
           t.id AS lead_id, t.name AS lead_name, t.role AS lead_role, t.position AS lead_position, \
           m.phone_number, m.personal_mail, m.gla_mail, m.university_roll, \
           m.linkedin_url, m.github_url, m.is_active, m.created_at, m.updated_at \
    FROM members m \
    LEFT JOIN users u ON u.id = m.user_id \
    LEFT JOIN domains d ON d.id = m.domain_id \
    LEFT JOIN team_members t ON t.id = m.lead_id";

pub async fn find_active(pool: &PgPool) -> Result<Vec<MemberDetail>, sqlx::Error> {
    let sql = format!("{SELECT_MEMBER} WHERE m.is_active ORDER BY m.created_at DESC, m.id DESC");
    let rows = sqlx::query_as::<_, MemberRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(MemberDetail::from).collect())
}

/// The active member record owned by `user_id` (zero or one row).
pub async fn find_active_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<MemberDetail>, sqlx::Error> {
    let sql = format!("{SELECT_MEMBER} WHERE m.is_active AND m.user_id = $1");
    let rows = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(MemberDetail::from).collect())
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<MemberDetail>, sqlx::Error> {
    let sql = format!("{SELECT_MEMBER} WHERE m.is_active AND m.id = $1");
    let row = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(MemberDetail::from))
}
