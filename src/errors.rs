use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::access::Denial;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    Hash(String),
    Session(String),
    Unauthenticated,
    Forbidden(String),
    Validation(String),
    NotFound,
}

/// Body of every error response: `{"detail": "..."}`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub detail: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(msg) => write!(f, "{msg}"),
            AppError::Unauthenticated => write!(f, "Authentication credentials were not provided."),
            AppError::Forbidden(reason) => write!(f, "{reason}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::NotFound => write!(f, "Not found."),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Migrate(_) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            AppError::Db(_) | AppError::Migrate(_) | AppError::Hash(_) => {
                log::error!("{self}");
                "Internal server error".to_string()
            }
            AppError::Session(e) => {
                log::warn!("Rejected session: {e}");
                self.to_string()
            }
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { detail })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        AppError::Forbidden(denial.reason().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_rt::test]
    async fn denial_becomes_forbidden_with_reason() {
        let (status, body) = body_json(AppError::from(Denial::NotTeamMember)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "You are not a team member");
    }

    #[actix_rt::test]
    async fn not_found_is_distinct_from_forbidden() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not found.");
    }

    #[actix_rt::test]
    async fn unauthenticated_is_401() {
        let (status, body) = body_json(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Authentication credentials were not provided.");
    }

    #[actix_rt::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) = body_json(AppError::Hash("salt exploded".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }

    #[actix_rt::test]
    async fn validation_is_400_with_message() {
        let (status, body) = body_json(AppError::Validation("Title is required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Title is required");
    }
}
