//! Member portal: classes, resources, member records. Login required.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use crate::access;
use crate::auth::identity::current_caller;
use crate::errors::AppError;
use crate::models::{class, domain, meeting, member, resource};
use crate::serializers::{ClassResponse, MeetingResponse, MemberResponse, PortalResponse, ResourceResponse};

/// GET /api/classes/
pub async fn list_classes(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let classes: Vec<ClassResponse> = class::find_active(&pool)
        .await?
        .into_iter()
        .map(|c| ClassResponse::new(c, now))
        .collect();
    Ok(HttpResponse::Ok().json(classes))
}

/// GET /api/classes/{id}/
pub async fn read_class(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = class::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ClassResponse::new(found, Utc::now())))
}

/// GET /api/resources/
pub async fn list_resources(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let resources: Vec<ResourceResponse> = resource::find_active(&pool)
        .await?
        .into_iter()
        .map(ResourceResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(resources))
}

/// GET /api/resources/{id}/
pub async fn read_resource(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = resource::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ResourceResponse::from(found)))
}

/// POST /api/resources/{id}/download/
pub async fn download_resource(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match resource::increment_download(&pool, id).await? {
        Some(count) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "download_count": count,
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "error": "Resource not found",
        }))),
    }
}

/// GET /api/members/ - staff see every active member, others only their own record.
pub async fn list_members(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let members = match (caller.is_staff, caller.user_id) {
        (true, _) => member::find_active(&pool).await?,
        (false, Some(user_id)) => member::find_active_for_user(&pool, user_id).await?,
        (false, None) => Vec::new(),
    };
    let body: Vec<MemberResponse> = members.into_iter().map(MemberResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/members/{id}/
pub async fn read_member(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let found = member::find_active_by_id(&pool, path.into_inner())
        .await?
        .filter(|m| caller.is_staff || (m.user_id.is_some() && m.user_id == caller.user_id))
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(MemberResponse::from(found)))
}

/// GET /api/portal/
pub async fn portal(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let now = Utc::now();

    let all_meetings = meeting::find_active(&pool).await?;
    let visible = access::visible_meetings(&caller, &all_meetings);
    let domains = domain::find_all_by_id(&pool).await?;

    let response = PortalResponse {
        classes: class::find_active(&pool)
            .await?
            .into_iter()
            .map(|c| ClassResponse::new(c, now))
            .collect(),
        resources: resource::find_active(&pool)
            .await?
            .into_iter()
            .map(ResourceResponse::from)
            .collect(),
        meetings: MeetingResponse::many(&visible, &domains, now),
    };
    Ok(HttpResponse::Ok().json(response))
}
