pub mod queries;
pub mod types;

pub use queries::*;
pub use types::*;

#[cfg(test)]
pub mod test_support {
    use chrono::{Duration, TimeZone, Utc};

    use super::types::Meeting;
    use crate::models::schedule::ScheduleStatus;

    /// An active meeting `day` days after a fixed epoch, tagged with `domain_ids`.
    pub fn meeting(id: i64, day: i64, domain_ids: Vec<i64>) -> Meeting {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 18, 0, 0).unwrap();
        let when = base + Duration::days(day);
        Meeting {
            id,
            title: format!("Meeting {id}"),
            description: None,
            speaker_id: None,
            speaker_name: None,
            speaker_other: None,
            scheduled_by: Some(1),
            scheduled_by_name: Some("Scheduler".to_string()),
            scheduled_date: when,
            end_time: None,
            meeting_link: None,
            location: None,
            status: ScheduleStatus::Upcoming,
            is_active: true,
            created_at: base,
            updated_at: base,
            domain_ids,
        }
    }
}
