use sqlx::PgPool;

use super::types::{NewUser, User, UserProfiles};

const SELECT_USER: &str = "\
    SELECT id, username, email, password_hash, first_name, last_name, is_staff, is_active, date_joined \
    FROM users";

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("{SELECT_USER} WHERE username = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("{SELECT_USER} WHERE id = $1");
    sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users").fetch_one(pool).await?;
    Ok(n)
}

/// Insert a new user. Returns the new id.
pub async fn create(pool: &PgPool, user: &NewUser) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash, first_name, last_name) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn create_staff(pool: &PgPool, user: &NewUser) -> Result<i64, sqlx::Error> {
    let id = create(pool, user).await?;
    sqlx::query("UPDATE users SET is_staff = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn update_profile(
    pool: &PgPool,
    id: i64,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET email = $2, first_name = $3, last_name = $4 WHERE id = $1")
        .bind(id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .execute(pool)
        .await?;
    Ok(())
}

/// Staff flag and active profile ids for an active user, in one query.
/// Inactive profiles are left out, so a deactivated team member loses its rights.
pub async fn find_profiles(pool: &PgPool, user_id: i64) -> Result<Option<UserProfiles>, sqlx::Error> {
    sqlx::query_as::<_, UserProfiles>(
        "SELECT u.id, u.is_staff, \
                tm.id AS team_member_id, tm.role AS team_member_role, \
                m.id AS member_id, m.domain_id AS member_domain_id \
         FROM users u \
         LEFT JOIN team_members tm ON tm.user_id = u.id AND tm.is_active \
         LEFT JOIN members m ON m.user_id = u.id AND m.is_active \
         WHERE u.id = $1 AND u.is_active",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
