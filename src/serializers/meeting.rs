use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format_schedule;
use crate::models::domain::Domain;
use crate::models::meeting::Meeting;
use crate::models::schedule::ScheduleStatus;

#[derive(Serialize, Debug, Clone)]
pub struct MeetingResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_by: Option<i64>,
    pub scheduled_by_name: Option<String>,
    pub speaker: Option<i64>,
    pub speaker_name: String,
    pub speaker_other: Option<String>,
    pub domains: Vec<i64>,
    pub domains_detail: Vec<Domain>,
    pub is_for_all_domains: bool,
    pub scheduled_date: DateTime<Utc>,
    pub scheduled_date_formatted: String,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: ScheduleStatus,
    pub status_display: &'static str,
    pub computed_status: ScheduleStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeetingResponse {
    /// `domains` resolves the meeting's domain ids; ids missing from it are
    /// still listed in `domains` but left out of `domains_detail`.
    pub fn new(meeting: &Meeting, domains: &HashMap<i64, Domain>, now: DateTime<Utc>) -> Self {
        let speaker_name = meeting
            .speaker_name
            .clone()
            .or_else(|| meeting.speaker_other.clone())
            .unwrap_or_else(|| "TBA".to_string());
        MeetingResponse {
            id: meeting.id,
            title: meeting.title.clone(),
            description: meeting.description.clone(),
            scheduled_by: meeting.scheduled_by,
            scheduled_by_name: meeting.scheduled_by_name.clone(),
            speaker: meeting.speaker_id,
            speaker_name,
            speaker_other: meeting.speaker_other.clone(),
            domains: meeting.domain_ids.clone(),
            domains_detail: meeting
                .domain_ids
                .iter()
                .filter_map(|id| domains.get(id).cloned())
                .collect(),
            is_for_all_domains: meeting.is_for_all_domains(),
            scheduled_date: meeting.scheduled_date,
            scheduled_date_formatted: format_schedule(meeting.scheduled_date),
            end_time: meeting.end_time,
            duration_minutes: meeting.duration_minutes(),
            meeting_link: meeting.meeting_link.clone(),
            location: meeting.location.clone(),
            status: meeting.status,
            status_display: meeting.status.display(),
            computed_status: meeting.computed_status(now),
            is_active: meeting.is_active,
            created_at: meeting.created_at,
            updated_at: meeting.updated_at,
        }
    }

    pub fn many(meetings: &[Meeting], domains: &HashMap<i64, Domain>, now: DateTime<Utc>) -> Vec<Self> {
        meetings.iter().map(|m| MeetingResponse::new(m, domains, now)).collect()
    }
}
