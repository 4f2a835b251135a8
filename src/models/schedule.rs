use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by meetings and classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(ScheduleStatus::Upcoming),
            "ongoing" => Some(ScheduleStatus::Ongoing),
            "completed" => Some(ScheduleStatus::Completed),
            "cancelled" => Some(ScheduleStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Upcoming => "upcoming",
            ScheduleStatus::Ongoing => "ongoing",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            ScheduleStatus::Upcoming => "Upcoming",
            ScheduleStatus::Ongoing => "Ongoing",
            ScheduleStatus::Completed => "Completed",
            ScheduleStatus::Cancelled => "Cancelled",
        }
    }
}

/// Status derived from the clock. An explicit `cancelled` or `completed`
/// always wins; otherwise the window `[start, end)` decides, with `end`
/// defaulting to `start + default_length` when unknown.
pub fn status_at(
    stored: ScheduleStatus,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    default_length: Duration,
    now: DateTime<Utc>,
) -> ScheduleStatus {
    if matches!(stored, ScheduleStatus::Cancelled | ScheduleStatus::Completed) {
        return stored;
    }
    let Some(start) = start else {
        return stored;
    };
    let end = end.unwrap_or(start + default_length);
    if now < start {
        ScheduleStatus::Upcoming
    } else if now < end {
        ScheduleStatus::Ongoing
    } else {
        ScheduleStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn clock_drives_open_statuses() {
        let len = Duration::minutes(60);
        let start = Some(at(10));
        let end = Some(at(12));
        assert_eq!(status_at(ScheduleStatus::Upcoming, start, end, len, at(9)), ScheduleStatus::Upcoming);
        assert_eq!(status_at(ScheduleStatus::Upcoming, start, end, len, at(11)), ScheduleStatus::Ongoing);
        assert_eq!(status_at(ScheduleStatus::Ongoing, start, end, len, at(12)), ScheduleStatus::Completed);
    }

    #[test]
    fn missing_end_uses_default_length() {
        let len = Duration::minutes(60);
        assert_eq!(status_at(ScheduleStatus::Upcoming, Some(at(10)), None, len, at(10)), ScheduleStatus::Ongoing);
        assert_eq!(status_at(ScheduleStatus::Upcoming, Some(at(10)), None, len, at(11)), ScheduleStatus::Completed);
    }

    #[test]
    fn explicit_terminal_statuses_win() {
        let len = Duration::minutes(60);
        assert_eq!(status_at(ScheduleStatus::Cancelled, Some(at(10)), None, len, at(9)), ScheduleStatus::Cancelled);
        assert_eq!(status_at(ScheduleStatus::Completed, Some(at(10)), None, len, at(9)), ScheduleStatus::Completed);
    }

    #[test]
    fn unscheduled_keeps_stored_status() {
        let len = Duration::minutes(60);
        assert_eq!(status_at(ScheduleStatus::Ongoing, None, None, len, at(9)), ScheduleStatus::Ongoing);
    }
}
