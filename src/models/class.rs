use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use super::schedule::{status_at, ScheduleStatus};

/// Classes without an end date are considered to run this long.
const DEFAULT_CLASS_LENGTH_MINUTES: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// How a class is delivered, derived from its link and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Offline,
    Hybrid,
    Tba,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Online => "online",
            Mode::Offline => "offline",
            Mode::Hybrid => "hybrid",
            Mode::Tba => "tba",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Offline => "Offline",
            Mode::Hybrid => "Hybrid",
            Mode::Tba => "To be announced",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Class {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: Option<i64>,
    pub instructor_team_name: Option<String>,
    pub instructor_name: Option<String>,
    pub difficulty: Difficulty,
    pub status: ScheduleStatus,
    pub thumbnail: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration: String,
    pub max_participants: i32,
    pub enrolled_count: i32,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub syllabus: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl Class {
    pub fn mode(&self) -> Mode {
        match (present(&self.meeting_link), present(&self.location)) {
            (true, true) => Mode::Hybrid,
            (true, false) => Mode::Online,
            (false, true) => Mode::Offline,
            (false, false) => Mode::Tba,
        }
    }

    pub fn is_full(&self) -> bool {
        self.max_participants > 0 && self.enrolled_count >= self.max_participants
    }

    pub fn computed_status(&self, now: DateTime<Utc>) -> ScheduleStatus {
        status_at(
            self.status,
            self.start_date,
            self.end_date,
            Duration::minutes(DEFAULT_CLASS_LENGTH_MINUTES),
            now,
        )
    }

    pub fn is_joinable(&self, now: DateTime<Utc>) -> bool {
        !self.is_full()
            && matches!(
                self.computed_status(now),
                ScheduleStatus::Upcoming | ScheduleStatus::Ongoing
            )
    }

    /// Team member instructor first, then the free-text name.
    pub fn instructor_display(&self) -> String {
        self.instructor_team_name
            .clone()
            .or_else(|| self.instructor_name.clone().filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| "TBA".to_string())
    }
}

#[derive(sqlx::FromRow)]
struct ClassRow {
    id: i64,
    title: String,
    description: String,
    instructor_id: Option<i64>,
    instructor_team_name: Option<String>,
    instructor_name: Option<String>,
    difficulty: String,
    status: String,
    thumbnail: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    duration: String,
    max_participants: i32,
    enrolled_count: i32,
    meeting_link: Option<String>,
    location: Option<String>,
    syllabus: Option<String>,
    is_active: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Class {
            id: row.id,
            title: row.title,
            description: row.description,
            instructor_id: row.instructor_id,
            instructor_team_name: row.instructor_team_name,
            instructor_name: row.instructor_name,
            difficulty: Difficulty::parse(&row.difficulty).unwrap_or(Difficulty::Beginner),
            status: ScheduleStatus::parse(&row.status).unwrap_or(ScheduleStatus::Upcoming),
            thumbnail: row.thumbnail,
            start_date: row.start_date,
            end_date: row.end_date,
            duration: row.duration,
            max_participants: row.max_participants,
            enrolled_count: row.enrolled_count,
            meeting_link: row.meeting_link,
            location: row.location,
            syllabus: row.syllabus,
            is_active: row.is_active,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CLASS: &str = "\
    SELECT c.id, c.title, c.description, c.instructor_id, t.name AS instructor_team_name, \
           c.instructor_name, c.difficulty, c.status, c.thumbnail, c.start_date, c.end_date, \
           c.duration, c.max_participants, c.enrolled_count, c.meeting_link, c.location, \
           c.syllabus, c.is_active, c.sort_order, c.created_at, c.updated_at \
    FROM classes c \
    LEFT JOIN team_members t ON t.id = c.instructor_id";

pub async fn find_active(pool: &PgPool) -> Result<Vec<Class>, sqlx::Error> {
    let sql = format!("{SELECT_CLASS} WHERE c.is_active ORDER BY c.sort_order, c.start_date DESC NULLS LAST, c.id DESC");
    let rows = sqlx::query_as::<_, ClassRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Class::from).collect())
}

pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Class>, sqlx::Error> {
    let sql = format!("{SELECT_CLASS} WHERE c.is_active AND c.id = $1");
    let row = sqlx::query_as::<_, ClassRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Class::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn class() -> Class {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 15, 0, 0).unwrap();
        Class {
            id: 1,
            title: "Intro to ROS".to_string(),
            description: String::new(),
            instructor_id: None,
            instructor_team_name: None,
            instructor_name: None,
            difficulty: Difficulty::Beginner,
            status: ScheduleStatus::Upcoming,
            thumbnail: None,
            start_date: Some(start),
            end_date: None,
            duration: "2 hours".to_string(),
            max_participants: 2,
            enrolled_count: 0,
            meeting_link: None,
            location: None,
            syllabus: None,
            is_active: true,
            sort_order: 0,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn mode_follows_link_and_location() {
        let mut c = class();
        assert_eq!(c.mode(), Mode::Tba);
        c.meeting_link = Some("https://meet.example/abc".to_string());
        assert_eq!(c.mode(), Mode::Online);
        c.location = Some("Lab 3".to_string());
        assert_eq!(c.mode(), Mode::Hybrid);
        c.meeting_link = Some("   ".to_string());
        assert_eq!(c.mode(), Mode::Offline);
    }

    #[test]
    fn full_classes_are_not_joinable() {
        let mut c = class();
        let before = Utc.with_ymd_and_hms(2026, 4, 30, 0, 0, 0).unwrap();
        assert!(c.is_joinable(before));
        c.enrolled_count = 2;
        assert!(c.is_full());
        assert!(!c.is_joinable(before));
    }

    #[test]
    fn finished_classes_are_not_joinable() {
        let c = class();
        let after = Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap();
        assert_eq!(c.computed_status(after), ScheduleStatus::Completed);
        assert!(!c.is_joinable(after));
    }

    #[test]
    fn instructor_display_prefers_team_member() {
        let mut c = class();
        assert_eq!(c.instructor_display(), "TBA");
        c.instructor_name = Some("Guest Speaker".to_string());
        assert_eq!(c.instructor_display(), "Guest Speaker");
        c.instructor_team_name = Some("Asha".to_string());
        assert_eq!(c.instructor_display(), "Asha");
    }
}
