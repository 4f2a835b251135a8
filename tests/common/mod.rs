//! Shared test fixtures.
//!
//! Database tests take their pool from `#[sqlx::test(migrations = "./migrations")]`,
//! which creates a throwaway database per test from DATABASE_URL and applies
//! the migrations before the test body runs.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;

use tars::auth::password;
use tars::models::meeting::MeetingFields;
use tars::models::schedule::ScheduleStatus;
use tars::models::user::{self, NewUser};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_PASS: &str = "correct-horse-battery";

// ============================================================================
// FIXTURES
// ============================================================================

pub async fn create_user(pool: &PgPool, username: &str, is_staff: bool) -> i64 {
    let new_user = NewUser {
        username: username.to_string(),
        email: format!("{username}@test.example"),
        password_hash: password::hash_password(TEST_PASS).expect("hash"),
        first_name: String::new(),
        last_name: String::new(),
    };
    if is_staff {
        user::create_staff(pool, &new_user).await.expect("create staff")
    } else {
        user::create(pool, &new_user).await.expect("create user")
    }
}

pub async fn create_team_member(pool: &PgPool, user_id: Option<i64>, name: &str, role: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO team_members (user_id, name, role, position) VALUES ($1, $2, $3, 'Member') RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("create team member");
    id
}

pub async fn create_domain(pool: &PgPool, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO domains (name, display_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(name.to_uppercase())
    .fetch_one(pool)
    .await
    .expect("create domain");
    id
}

pub async fn create_member(pool: &PgPool, user_id: i64, domain_id: Option<i64>) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO members (user_id, domain_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(domain_id)
    .fetch_one(pool)
    .await
    .expect("create member");
    id
}

pub fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 17, 0, 0).unwrap()
}

/// Writable meeting fields `day` days after `base_date()`.
pub fn meeting_fields(title: &str, day: i64, scheduled_by: Option<i64>, domain_ids: Vec<i64>) -> MeetingFields {
    MeetingFields {
        title: title.to_string(),
        description: None,
        speaker_id: None,
        speaker_other: None,
        scheduled_by,
        scheduled_date: base_date() + Duration::days(day),
        end_time: None,
        meeting_link: None,
        location: None,
        status: ScheduleStatus::Upcoming,
        domain_ids,
    }
}
