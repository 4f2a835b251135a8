use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Internal user struct for authentication, includes the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// Identity flags plus the ids of the profiles linked to a user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfiles {
    pub id: i64,
    pub is_staff: bool,
    pub team_member_id: Option<i64>,
    pub team_member_role: Option<String>,
    pub member_id: Option<i64>,
    pub member_domain_id: Option<i64>,
}

/// New user data for creation. `password_hash` is already hashed.
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirm: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
