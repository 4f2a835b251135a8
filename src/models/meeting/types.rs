use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};

use crate::auth::validate;
use crate::models::schedule::{status_at, ScheduleStatus};

/// Meetings without an end time are considered to last this long.
pub const DEFAULT_MEETING_LENGTH_MINUTES: i64 = 60;

/// A stored meeting with its scheduler/speaker names and domain set resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub speaker_id: Option<i64>,
    pub speaker_name: Option<String>,
    pub speaker_other: Option<String>,
    pub scheduled_by: Option<i64>,
    pub scheduled_by_name: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: ScheduleStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Sorted, no duplicates. Empty means visible to every domain.
    pub domain_ids: Vec<i64>,
}

impl Meeting {
    pub fn is_for_all_domains(&self) -> bool {
        self.domain_ids.is_empty()
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.scheduled_date).num_minutes())
            .filter(|m| *m > 0)
    }

    pub fn computed_status(&self, now: DateTime<Utc>) -> ScheduleStatus {
        status_at(
            self.status,
            Some(self.scheduled_date),
            self.end_time,
            Duration::minutes(DEFAULT_MEETING_LENGTH_MINUTES),
            now,
        )
    }
}

/// Every writable column of a meeting, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingFields {
    pub title: String,
    pub description: Option<String>,
    pub speaker_id: Option<i64>,
    pub speaker_other: Option<String>,
    pub scheduled_by: Option<i64>,
    pub scheduled_date: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: ScheduleStatus,
    pub domain_ids: Vec<i64>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_domains(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl MeetingFields {
    /// Field-level checks that need no database. Returns every problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.title, "Title", 300));
        if let Some(location) = &self.location {
            errors.extend(validate::validate_optional(location, "Location", 300));
        }
        if let Some(speaker) = &self.speaker_other {
            errors.extend(validate::validate_optional(speaker, "Speaker name", 200));
        }
        if let Some(link) = &self.meeting_link {
            errors.extend(validate::validate_url(link, "Meeting link"));
        }
        if let Some(end) = self.end_time {
            if end <= self.scheduled_date {
                errors.push("End time must be after the scheduled date".to_string());
            }
        }
        errors
    }
}

/// Body of `POST` and `PUT` on the meeting endpoint.
#[derive(Debug, Deserialize)]
pub struct MeetingInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "speaker")]
    pub speaker_id: Option<i64>,
    #[serde(default)]
    pub speaker_other: Option<String>,
    /// Only honoured for staff callers.
    #[serde(default)]
    pub scheduled_by: Option<i64>,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
    #[serde(default)]
    pub domains: Vec<i64>,
}

impl MeetingInput {
    pub fn into_fields(self, scheduled_by: Option<i64>) -> MeetingFields {
        MeetingFields {
            title: self.title.trim().to_string(),
            description: blank_to_none(self.description),
            speaker_id: self.speaker_id,
            speaker_other: blank_to_none(self.speaker_other),
            scheduled_by,
            scheduled_date: self.scheduled_date,
            end_time: self.end_time,
            meeting_link: blank_to_none(self.meeting_link),
            location: blank_to_none(self.location),
            status: self.status.unwrap_or(ScheduleStatus::Upcoming),
            domain_ids: normalize_domains(self.domains),
        }
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `PATCH`: absent keys keep their current value, `null` clears.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "speaker", deserialize_with = "double_option")]
    pub speaker_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub speaker_other: Option<Option<String>>,
    #[serde(default)]
    pub scheduled_by: Option<i64>,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub meeting_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
    #[serde(default)]
    pub domains: Option<Vec<i64>>,
}

impl MeetingPatch {
    /// Overlay the patch on `current`. `scheduled_by` is decided by the caller.
    pub fn apply(self, current: &Meeting, scheduled_by: Option<i64>) -> MeetingFields {
        MeetingFields {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| current.title.clone()),
            description: match self.description {
                Some(v) => blank_to_none(v),
                None => current.description.clone(),
            },
            speaker_id: self.speaker_id.unwrap_or(current.speaker_id),
            speaker_other: match self.speaker_other {
                Some(v) => blank_to_none(v),
                None => current.speaker_other.clone(),
            },
            scheduled_by,
            scheduled_date: self.scheduled_date.unwrap_or(current.scheduled_date),
            end_time: self.end_time.unwrap_or(current.end_time),
            meeting_link: match self.meeting_link {
                Some(v) => blank_to_none(v),
                None => current.meeting_link.clone(),
            },
            location: match self.location {
                Some(v) => blank_to_none(v),
                None => current.location.clone(),
            },
            status: self.status.unwrap_or(current.status),
            domain_ids: match self.domains {
                Some(ids) => normalize_domains(ids),
                None => current.domain_ids.clone(),
            },
        }
    }
}
