use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::access::Caller;
use crate::auth::identity::current_caller;
use crate::auth::rate_limit::RateLimiter;
use crate::auth::{password, session as auth_session, validate};
use crate::errors::{AppError, ErrorBody};
use crate::models::user::{self, LoginRequest, NewUser, ProfileUpdateRequest, RegisterRequest};
use crate::serializers::ProfileResponse;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// POST /api/auth/register/ - creates a plain user and logs them in.
pub async fn register(
    pool: web::Data<PgPool>,
    session: Session,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let username = body.username.trim().to_string();
    let email = body.email.trim().to_string();

    let mut errors = Vec::new();
    errors.extend(validate::validate_username(&username));
    errors.extend(validate::validate_email(&email));
    errors.extend(validate::validate_password(&body.password));
    if body.password_confirm.as_deref().is_some_and(|c| c != body.password) {
        errors.push("Passwords do not match".to_string());
    }
    errors.extend(validate::validate_optional(&body.first_name, "First name", 150));
    errors.extend(validate::validate_optional(&body.last_name, "Last name", 150));
    if errors.is_empty() && user::username_exists(&pool, &username).await? {
        errors.push("A user with that username already exists".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let password_hash = password::hash_password(&body.password).map_err(AppError::Hash)?;
    let new_user = NewUser {
        username,
        email,
        password_hash,
        first_name: body.first_name.trim().to_string(),
        last_name: body.last_name.trim().to_string(),
    };
    let id = user::create(&pool, &new_user).await?;
    log::info!("Registered user {} ({id})", new_user.username);

    let created = user::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    auth_session::log_in(&session, id, &created.username)?;
    let caller = Caller {
        user_id: Some(id),
        ..Caller::default()
    };
    Ok(HttpResponse::Created().json(ProfileResponse::new(created, &caller)))
}

/// POST /api/auth/login/
pub async fn login(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    limiter: web::Data<RateLimiter>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Login blocked for {ip}: too many failed attempts");
        return Ok(HttpResponse::TooManyRequests().json(ErrorBody {
            detail: "Too many failed login attempts. Please try again later.".to_string(),
        }));
    }

    let found = user::find_by_username(&pool, body.username.trim())
        .await?
        .filter(|u| u.is_active);

    let Some(u) = found else {
        limiter.record_failure(ip);
        return Err(AppError::Session(INVALID_CREDENTIALS.to_string()));
    };

    match password::verify_password(&body.password, &u.password_hash) {
        Ok(true) => {
            limiter.clear(ip);
            auth_session::log_in(&session, u.id, &u.username)?;
            let caller = current_caller(&pool, &session).await?;
            log::info!("User {} logged in", u.username);
            Ok(HttpResponse::Ok().json(ProfileResponse::new(u, &caller)))
        }
        _ => {
            limiter.record_failure(ip);
            Err(AppError::Session(INVALID_CREDENTIALS.to_string()))
        }
    }
}

/// POST /api/auth/logout/
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    auth_session::log_out(&session);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "detail": "Logged out" })))
}

/// GET /api/auth/profile/
pub async fn profile(pool: web::Data<PgPool>, session: Session) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let user_id = auth_session::require_user_id(&session)?;
    let u = user::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::new(u, &caller)))
}

/// PUT /api/auth/profile/update/ - omitted fields keep their value.
pub async fn update_profile(
    pool: web::Data<PgPool>,
    session: Session,
    body: web::Json<ProfileUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&pool, &session).await?;
    let user_id = auth_session::require_user_id(&session)?;
    let current = user::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let body = body.into_inner();
    let email = body.email.map(|e| e.trim().to_string()).unwrap_or(current.email.clone());
    let first_name = body.first_name.map(|n| n.trim().to_string()).unwrap_or(current.first_name.clone());
    let last_name = body.last_name.map(|n| n.trim().to_string()).unwrap_or(current.last_name.clone());

    let mut errors = Vec::new();
    errors.extend(validate::validate_email(&email));
    errors.extend(validate::validate_optional(&first_name, "First name", 150));
    errors.extend(validate::validate_optional(&last_name, "Last name", 150));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    user::update_profile(&pool, user_id, &email, &first_name, &last_name).await?;
    crate::audit::record(
        &pool,
        Some(user_id),
        "user.profile_updated",
        "user",
        user_id,
        serde_json::json!({ "email": email }),
    )
    .await;

    let updated = user::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::new(updated, &caller)))
}
