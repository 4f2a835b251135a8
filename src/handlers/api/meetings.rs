use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use crate::access::{self, Caller, Mutation};
use crate::auth::identity::current_caller;
use crate::errors::AppError;
use crate::models::domain::{self, Domain};
use crate::models::meeting::{self, Meeting, MeetingFields, MeetingInput, MeetingPatch};
use crate::models::team_member;
use crate::serializers::MeetingResponse;

async fn respond_many(pool: &PgPool, meetings: &[Meeting]) -> Result<HttpResponse, AppError> {
    let domains = if meetings.iter().all(Meeting::is_for_all_domains) {
        HashMap::new()
    } else {
        domain::find_all_by_id(pool).await?
    };
    Ok(HttpResponse::Ok().json(MeetingResponse::many(meetings, &domains, Utc::now())))
}

async fn serialize_one(pool: &PgPool, meeting: &Meeting) -> Result<MeetingResponse, AppError> {
    let domains: HashMap<i64, Domain> = if meeting.is_for_all_domains() {
        HashMap::new()
    } else {
        domain::find_all_by_id(pool).await?
    };
    Ok(MeetingResponse::new(meeting, &domains, Utc::now()))
}

/// Checks that need the database, on top of `MeetingFields::validate`.
/// References are only re-checked when they differ from `current`, so an
/// edit never fails because an untouched speaker was deactivated later.
async fn validate_fields(
    pool: &PgPool,
    fields: &MeetingFields,
    current: Option<&Meeting>,
) -> Result<(), AppError> {
    let mut errors = fields.validate();

    let unknown = domain::find_unknown_ids(pool, &fields.domain_ids).await?;
    if !unknown.is_empty() {
        let ids: Vec<String> = unknown.iter().map(i64::to_string).collect();
        errors.push(format!("Unknown or inactive domain(s): {}", ids.join(", ")));
    }

    if let Some(speaker) = fields.speaker_id {
        let unchanged = current.is_some_and(|m| m.speaker_id == Some(speaker));
        if !unchanged && !team_member::exists_active(pool, speaker).await? {
            errors.push("Speaker must be an active team member".to_string());
        }
    }

    if let Some(scheduler) = fields.scheduled_by {
        let unchanged = current.is_some_and(|m| m.scheduled_by == Some(scheduler));
        if !unchanged && !team_member::exists_active(pool, scheduler).await? {
            errors.push("Scheduler must be an active team member".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

/// Scheduler of a new meeting: the caller's own team member profile, unless a
/// staff caller names someone explicitly.
fn scheduler_for_new(caller: &Caller, requested: Option<i64>) -> Result<i64, AppError> {
    if caller.is_staff {
        if let Some(id) = requested {
            return Ok(id);
        }
    }
    caller
        .team_member_id()
        .ok_or_else(|| AppError::Validation("scheduled_by is required".to_string()))
}

/// Only staff may hand a meeting over to another scheduler.
fn scheduler_for_update(caller: &Caller, current: &Meeting, requested: Option<i64>) -> Option<i64> {
    match requested {
        Some(id) if caller.is_staff => Some(id),
        _ => current.scheduled_by,
    }
}

/// Active meeting by id, before any ownership check so a missing id is 404, not 403.
async fn find_for_mutation(pool: &PgPool, id: i64) -> Result<Meeting, AppError> {
    meeting::find_active_by_id(pool, id)
        .await?
        .ok_or(AppError::NotFound)
}

fn audit_details(fields: &MeetingFields) -> serde_json::Value {
    json!({
        "title": fields.title,
        "scheduled_date": fields.scheduled_date,
        "status": fields.status.as_str(),
        "domains": fields.domain_ids,
        "scheduled_by": fields.scheduled_by,
    })
}

/// GET /api/meetings/
pub async fn list(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let meetings = meeting::find_active(&pool).await?;
    let visible = access::visible_meetings(&caller, &meetings);
    respond_many(&pool, &visible).await
}

/// GET /api/meetings/{id}/ - only meetings the caller could also list.
pub async fn read(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let id = path.into_inner();
    let found = meeting::find_active_by_id(&pool, id)
        .await?
        .filter(|m| access::MeetingScope::for_caller(&caller).admits(m))
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(serialize_one(&pool, &found).await?))
}

/// POST /api/meetings/
pub async fn create(
    pool: web::Data<PgPool>,
    session: Session,
    body: web::Json<MeetingInput>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    access::require_create(&caller)?;

    let input = body.into_inner();
    let scheduled_by = scheduler_for_new(&caller, input.scheduled_by)?;
    let fields = input.into_fields(Some(scheduled_by));
    validate_fields(&pool, &fields, None).await?;

    let id = meeting::create(&pool, &fields).await?;
    log::info!("Meeting {id} scheduled by team member {scheduled_by}");
    crate::audit::record(&pool, caller.user_id, "meeting.created", "meeting", id, audit_details(&fields)).await;

    let created = meeting::find_active_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(serialize_one(&pool, &created).await?))
}

async fn apply_update(
    pool: &PgPool,
    caller: &Caller,
    current: &Meeting,
    fields: MeetingFields,
) -> Result<HttpResponse, AppError> {
    validate_fields(pool, &fields, Some(current)).await?;

    if !meeting::update(pool, current.id, &fields).await? {
        // Deactivated between the lookup and the write.
        return Err(AppError::NotFound);
    }
    log::info!("Meeting {} updated by user {:?}", current.id, caller.user_id);
    crate::audit::record(pool, caller.user_id, "meeting.updated", "meeting", current.id, audit_details(&fields)).await;

    let updated = meeting::find_active_by_id(pool, current.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(serialize_one(pool, &updated).await?))
}

/// PUT /api/meetings/{id}/ - full replacement; omitted optional fields are cleared.
pub async fn update(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<MeetingInput>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let current = find_for_mutation(&pool, path.into_inner()).await?;
    access::require_mutate(&caller, &current, Mutation::Update)?;

    let input = body.into_inner();
    let scheduled_by = scheduler_for_update(&caller, &current, input.scheduled_by);
    apply_update(&pool, &caller, &current, input.into_fields(scheduled_by)).await
}

/// PATCH /api/meetings/{id}/
pub async fn partial_update(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<MeetingPatch>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let current = find_for_mutation(&pool, path.into_inner()).await?;
    access::require_mutate(&caller, &current, Mutation::Update)?;

    let patch = body.into_inner();
    let scheduled_by = scheduler_for_update(&caller, &current, patch.scheduled_by);
    let fields = patch.apply(&current, scheduled_by);
    apply_update(&pool, &caller, &current, fields).await
}

/// DELETE /api/meetings/{id}/ - soft delete.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let current = find_for_mutation(&pool, path.into_inner()).await?;
    access::require_mutate(&caller, &current, Mutation::Delete)?;

    if !meeting::deactivate(&pool, current.id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("Meeting {} deleted by user {:?}", current.id, caller.user_id);
    let details = json!({ "title": current.title });
    crate::audit::record(&pool, caller.user_id, "meeting.deleted", "meeting", current.id, details).await;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/meetings/my_scheduled/
pub async fn my_scheduled(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let own = caller.team_member_id().ok_or(access::Denial::NotTeamMember)?;
    let candidates = meeting::find_active_scheduled_by(&pool, own).await?;
    let scheduled = access::my_scheduled_meetings(&caller, &candidates)?;
    respond_many(&pool, &scheduled).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::TeamMemberProfile;
    use crate::models::meeting::test_support::meeting;
    use crate::models::team_member::TeamRole;

    fn staff(team_member: Option<i64>) -> Caller {
        Caller {
            user_id: Some(1),
            is_staff: true,
            team_member: team_member.map(|id| TeamMemberProfile { id, role: TeamRole::Admin }),
            member: None,
        }
    }

    fn mentor(id: i64) -> Caller {
        Caller {
            user_id: Some(2),
            team_member: Some(TeamMemberProfile { id, role: TeamRole::Mentor }),
            ..Caller::default()
        }
    }

    #[test]
    fn new_meeting_scheduler() {
        assert_eq!(scheduler_for_new(&mentor(4), Some(9)).unwrap(), 4);
        assert_eq!(scheduler_for_new(&staff(Some(3)), Some(9)).unwrap(), 9);
        assert_eq!(scheduler_for_new(&staff(Some(3)), None).unwrap(), 3);
        assert!(matches!(
            scheduler_for_new(&staff(None), None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn only_staff_reassign_scheduler() {
        let current = meeting(1, 0, vec![]);
        assert_eq!(scheduler_for_update(&mentor(1), &current, Some(7)), Some(1));
        assert_eq!(scheduler_for_update(&staff(None), &current, Some(7)), Some(7));
        assert_eq!(scheduler_for_update(&staff(None), &current, None), Some(1));
    }
}
