use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format_schedule;
use super::meeting::MeetingResponse;
use crate::models::class::Class;
use crate::models::domain::Domain;
use crate::models::member::{LeadRef, MemberDetail};
use crate::models::resource::Resource;
use crate::models::team_member::TeamRole;

#[derive(Serialize, Debug, Clone)]
pub struct ClassResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: Option<i64>,
    pub instructor_display: String,
    pub difficulty: &'static str,
    pub difficulty_display: &'static str,
    pub status: &'static str,
    /// Label of the time-based status, not the stored one.
    pub status_display: &'static str,
    pub mode: &'static str,
    pub mode_display: &'static str,
    pub thumbnail: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub start_date_formatted: String,
    pub end_date: Option<DateTime<Utc>>,
    pub duration: String,
    pub max_participants: i32,
    pub enrolled_count: i32,
    pub is_full: bool,
    pub is_joinable: bool,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub syllabus: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassResponse {
    pub fn new(class: Class, now: DateTime<Utc>) -> Self {
        let mode = class.mode();
        ClassResponse {
            instructor_display: class.instructor_display(),
            difficulty: class.difficulty.as_str(),
            difficulty_display: class.difficulty.display(),
            status: class.status.as_str(),
            status_display: class.computed_status(now).display(),
            mode: mode.as_str(),
            mode_display: mode.display(),
            start_date_formatted: class
                .start_date
                .map(format_schedule)
                .unwrap_or_else(|| "Date not set".to_string()),
            is_full: class.is_full(),
            is_joinable: class.is_joinable(now),
            id: class.id,
            title: class.title,
            description: class.description,
            instructor_id: class.instructor_id,
            thumbnail: class.thumbnail,
            start_date: class.start_date,
            end_date: class.end_date,
            duration: class.duration,
            max_participants: class.max_participants,
            enrolled_count: class.enrolled_count,
            meeting_link: class.meeting_link,
            location: class.location,
            syllabus: class.syllabus,
            is_active: class.is_active,
            order: class.sort_order,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ResourceResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub category_display: String,
    pub thumbnail: Option<String>,
    pub file: Option<String>,
    pub external_link: Option<String>,
    pub author: Option<String>,
    pub tags: String,
    pub tag_list: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub download_count: i64,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        ResourceResponse {
            category_display: r.category_display(),
            tag_list: r.tag_list(),
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            thumbnail: r.thumbnail,
            file: r.file,
            external_link: r.external_link,
            author: r.author,
            tags: r.tags,
            is_featured: r.is_featured,
            is_active: r.is_active,
            download_count: r.download_count,
            order: r.sort_order,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LeadResponse {
    pub id: i64,
    pub name: String,
    pub role: TeamRole,
    pub role_display: &'static str,
    pub position: String,
}

impl From<LeadRef> for LeadResponse {
    fn from(l: LeadRef) -> Self {
        LeadResponse {
            id: l.id,
            name: l.name,
            role: l.role,
            role_display: l.role.display(),
            position: l.position,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MemberResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub domain: Option<Domain>,
    pub lead: Option<LeadResponse>,
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

impl From<MemberDetail> for MemberResponse {
    fn from(m: MemberDetail) -> Self {
        MemberResponse {
            id: m.id,
            user_id: m.user_id,
            username: m.username,
            domain: m.domain,
            lead: m.lead.map(LeadResponse::from),
            phone_number: m.phone_number,
            personal_mail: m.personal_mail,
            gla_mail: m.gla_mail,
            university_roll: m.university_roll,
            linkedin_url: m.linkedin_url,
            github_url: m.github_url,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// The logged-in landing page: classes, resources and the meetings this caller may see.
#[derive(Serialize, Debug)]
pub struct PortalResponse {
    pub classes: Vec<ClassResponse>,
    pub resources: Vec<ResourceResponse>,
    pub meetings: Vec<MeetingResponse>,
}
