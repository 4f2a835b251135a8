//! Unauthenticated service endpoints: welcome, health and info.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::AppError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET /
pub async fn root(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let platform = config.platform.label();
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Welcome to TARS Club API - {platform} Backend"),
        "version": VERSION,
        "platform": platform,
        "endpoints": {
            "health": "/api/health/",
            "info": "/api/info/",
            "home": "/api/home/",
            "auth": {
                "register": "/api/auth/register/",
                "login": "/api/auth/login/",
                "logout": "/api/auth/logout/",
                "profile": "/api/auth/profile/",
            },
            "data": {
                "site_settings": "/api/site-settings/",
                "sponsors": "/api/sponsors/",
                "social_links": "/api/social-links/",
                "team_members": "/api/team-members/",
                "domains": "/api/domains/",
                "members": "/api/members/",
                "classes": "/api/classes/",
                "resources": "/api/resources/",
                "meetings": "/api/meetings/",
                "portal": "/api/portal/",
            }
        }
    })))
}

/// GET /api/health/ - 503 when the database does not answer.
pub async fn health(pool: web::Data<PgPool>, config: web::Data<AppConfig>) -> HttpResponse {
    let platform = config.platform.label();
    let mut body = json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": format!("TARS Backend API - {platform}"),
        "platform": platform,
        "database": "connected",
    });

    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(body),
        Err(e) => {
            log::error!("Health check failed: {e}");
            body["status"] = json!("unhealthy");
            body["database"] = json!(format!("error: {e}"));
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}

/// GET /api/info/
pub async fn info(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let platform = config.platform.label();
    Ok(HttpResponse::Ok().json(json!({
        "name": format!("TARS Club {platform} API"),
        "version": VERSION,
        "platform": platform,
        "description": format!("Backend API for the TARS {platform} clients"),
        "endpoints": {
            "health": "/api/health/",
            "info": "/api/info/",
        }
    })))
}
