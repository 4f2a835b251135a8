use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Organizational staff role. Any of them may schedule meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Admin,
    Lead,
    Mentor,
}

impl TeamRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(TeamRole::Admin),
            "lead" => Some(TeamRole::Lead),
            "mentor" => Some(TeamRole::Mentor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "admin",
            TeamRole::Lead => "lead",
            TeamRole::Mentor => "mentor",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            TeamRole::Admin => "Admin",
            TeamRole::Lead => "Lead",
            TeamRole::Mentor => "Mentor",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub role: TeamRole,
    pub position: String,
    pub email: Option<String>,
    pub quote: Option<String>,
    pub tech_stack: Option<String>,
    pub image: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub website_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: i64,
    user_id: Option<i64>,
    name: String,
    role: String,
    position: String,
    email: Option<String>,
    quote: Option<String>,
    tech_stack: Option<String>,
    image: Option<String>,
    linkedin_url: Option<String>,
    github_url: Option<String>,
    twitter_url: Option<String>,
    instagram_url: Option<String>,
    website_url: Option<String>,
    sort_order: i32,
    is_active: bool,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        TeamMember {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            // The column has a CHECK constraint, so the fallback is unreachable in practice.
            role: TeamRole::parse(&row.role).unwrap_or(TeamRole::Mentor),
            position: row.position,
            email: row.email,
            quote: row.quote,
            tech_stack: row.tech_stack,
            image: row.image,
            linkedin_url: row.linkedin_url,
            github_url: row.github_url,
            twitter_url: row.twitter_url,
            instagram_url: row.instagram_url,
            website_url: row.website_url,
            sort_order: row.sort_order,
            is_active: row.is_active,
        }
    }
}

const SELECT_TEAM_MEMBER: &str = "\
    SELECT id, user_id, name, role, position, email, quote, tech_stack, image, \
           linkedin_url, github_url, twitter_url, instagram_url, website_url, \
           sort_order, is_active \
    FROM team_members";

/// All active team members, grouped by role then display order.
pub async fn find_active(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
    let sql = format!("{SELECT_TEAM_MEMBER} WHERE is_active ORDER BY role, sort_order, name");
    let rows = sqlx::query_as::<_, TeamMemberRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(TeamMember::from).collect())
}

pub async fn find_active_by_role(pool: &PgPool, role: TeamRole) -> Result<Vec<TeamMember>, sqlx::Error> {
    let sql = format!("{SELECT_TEAM_MEMBER} WHERE is_active AND role = $1 ORDER BY sort_order, name");
    let rows = sqlx::query_as::<_, TeamMemberRow>(&sql)
        .bind(role.as_str())
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(TeamMember::from).collect())
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<TeamMember>, sqlx::Error> {
    let sql = format!("{SELECT_TEAM_MEMBER} WHERE is_active AND id = $1");
    let row = sqlx::query_as::<_, TeamMemberRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(TeamMember::from))
}

pub async fn exists_active(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM team_members WHERE id = $1 AND is_active)")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
