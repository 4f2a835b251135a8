use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use tars::auth::rate_limit::RateLimiter;
use tars::config::AppConfig;
use tars::{audit, db, handlers};

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(startup_error)?;

    // Initialize database
    let pool = db::init_pool(&config).await.map_err(startup_error)?;
    db::run_migrations(&pool).await.map_err(startup_error)?;
    db::seed(&pool, &config).await.map_err(startup_error)?;

    // Clean up old audit entries based on retention policy
    match audit::cleanup_old_entries(&pool, config.audit_retention_days).await {
        Ok(0) => {}
        Ok(n) => log::info!("Removed {n} audit entries older than {} days", config.audit_retention_days),
        Err(e) => log::warn!("Audit cleanup failed: {e}"),
    }

    // Session encryption key: load from SESSION_KEY for persistent sessions across restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = web::Data::new(RateLimiter::new());
    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.session_cookie_secure;
    let config = web::Data::new(config);

    log::info!("Starting {} API at http://{bind_addr}", config.platform.label());

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .app_data(limiter.clone())
            .route("/", web::get().to(handlers::status_handlers::root))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(tars::errors::ErrorBody {
                    detail: "Not found.".to_string(),
                })
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
