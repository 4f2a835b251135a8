pub mod auth;
pub mod meetings;
pub mod portal;
pub mod site;

use actix_web::{
    web, Error, HttpRequest, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    error::PathError,
    middleware::{from_fn, Next},
};

use super::status_handlers;
use crate::auth::middleware::require_auth;
use crate::errors::{AppError, ErrorBody};

/// CSRF protection for mutation endpoints.
///
/// Rejects POST/PUT/PATCH/DELETE requests without `Content-Type: application/json`.
/// Browsers cannot send cross-origin JSON with cookies via a simple form POST,
/// so the header check stands in for CSRF tokens. GET requests are exempt.
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH || method == Method::DELETE {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ErrorBody {
                detail: "Content-Type must be application/json for mutation requests".to_string(),
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Ids that fail to parse name no resource, so they get the JSON 404.
fn path_not_found(err: PathError, req: &HttpRequest) -> Error {
    log::debug!("Unmatched path parameter on {}: {err}", req.path());
    AppError::NotFound.into()
}

/// Configure everything under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::PathConfig::default().error_handler(path_not_found))
            .wrap(from_fn(require_json_content_type))
            .route("/health/", web::get().to(status_handlers::health))
            .route("/info/", web::get().to(status_handlers::info))
            .route("/home/", web::get().to(site::home))
            .route("/site-settings/", web::get().to(site::list_settings))
            .route("/site-settings/{id}/", web::get().to(site::read_settings))
            .route("/sponsors/", web::get().to(site::list_sponsors))
            .route("/sponsors/{id}/", web::get().to(site::read_sponsor))
            .route("/social-links/", web::get().to(site::list_social_links))
            .route("/social-links/{id}/", web::get().to(site::read_social_link))
            .route("/team-members/", web::get().to(site::list_team_members))
            .route("/team-members/{id}/", web::get().to(site::read_team_member))
            .route("/domains/", web::get().to(site::list_domains))
            .route("/domains/{id}/", web::get().to(site::read_domain))
            .service(
                web::scope("/auth")
                    .route("/register/", web::post().to(auth::register))
                    .route("/login/", web::post().to(auth::login))
                    .route("/logout/", web::post().to(auth::logout))
                    .service(
                        web::scope("/profile")
                            .wrap(from_fn(require_auth))
                            .route("/", web::get().to(auth::profile))
                            .route("/update/", web::put().to(auth::update_profile)),
                    ),
            )
            // my_scheduled BEFORE {id} to avoid routing conflict
            .service(
                web::scope("/meetings")
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(meetings::list))
                    .route("/", web::post().to(meetings::create))
                    .route("/my_scheduled/", web::get().to(meetings::my_scheduled))
                    .route("/{id}/", web::get().to(meetings::read))
                    .route("/{id}/", web::put().to(meetings::update))
                    .route("/{id}/", web::patch().to(meetings::partial_update))
                    .route("/{id}/", web::delete().to(meetings::delete)),
            )
            .service(
                web::scope("/classes")
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(portal::list_classes))
                    .route("/{id}/", web::get().to(portal::read_class)),
            )
            .service(
                web::scope("/resources")
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(portal::list_resources))
                    .route("/{id}/", web::get().to(portal::read_resource))
                    .route("/{id}/download/", web::post().to(portal::download_resource)),
            )
            .service(
                web::scope("/members")
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(portal::list_members))
                    .route("/{id}/", web::get().to(portal::read_member)),
            )
            .service(
                web::scope("/portal")
                    .wrap(from_fn(require_auth))
                    .route("/", web::get().to(portal::portal)),
            ),
    );
}
