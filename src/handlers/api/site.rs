//! Public, read-only site content.

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::team_member::TeamRole;
use crate::models::{domain, site_settings, social_link, sponsor, team_member};
use crate::serializers::{HomeResponse, SocialLinkResponse, SponsorResponse, TeamMemberResponse};

/// GET /api/site-settings/
pub async fn list_settings(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(site_settings::find_all(&pool).await?))
}

/// GET /api/site-settings/{id}/
pub async fn read_settings(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let settings = site_settings::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(settings))
}

/// GET /api/sponsors/
pub async fn list_sponsors(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let sponsors: Vec<SponsorResponse> = sponsor::find_active(&pool)
        .await?
        .into_iter()
        .map(SponsorResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(sponsors))
}

/// GET /api/sponsors/{id}/
pub async fn read_sponsor(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = sponsor::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(SponsorResponse::from(found)))
}

/// GET /api/social-links/
pub async fn list_social_links(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let links: Vec<SocialLinkResponse> = social_link::find_active(&pool)
        .await?
        .into_iter()
        .map(SocialLinkResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(links))
}

/// GET /api/social-links/{id}/
pub async fn read_social_link(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = social_link::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(SocialLinkResponse::from(found)))
}

/// GET /api/team-members/
pub async fn list_team_members(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let members: Vec<TeamMemberResponse> = team_member::find_active(&pool)
        .await?
        .into_iter()
        .map(TeamMemberResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(members))
}

/// GET /api/team-members/{id}/
pub async fn read_team_member(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = team_member::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(TeamMemberResponse::from(found)))
}

/// GET /api/domains/
pub async fn list_domains(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(domain::find_active(&pool).await?))
}

/// GET /api/domains/{id}/
pub async fn read_domain(pool: web::Data<PgPool>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let found = domain::find_active_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(found))
}

async fn team_with_role(pool: &PgPool, role: TeamRole) -> Result<Vec<TeamMemberResponse>, AppError> {
    let members = team_member::find_active_by_role(pool, role).await?;
    Ok(members.into_iter().map(TeamMemberResponse::from).collect())
}

/// GET /api/home/
pub async fn home(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let mentors = team_with_role(&pool, TeamRole::Mentor).await?;
    let leads = team_with_role(&pool, TeamRole::Lead).await?;

    let response = HomeResponse {
        site_settings: site_settings::find_current(&pool).await?,
        sponsors: sponsor::find_active(&pool)
            .await?
            .into_iter()
            .map(SponsorResponse::from)
            .collect(),
        mentors,
        leads,
        social_links: social_link::find_active(&pool)
            .await?
            .into_iter()
            .map(SocialLinkResponse::from)
            .collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}
