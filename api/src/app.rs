//! Application state and factory
//!
//! Builds the actix `App` around an already constructed [`TokenService`].
//! The binary adds request tracing and server settings on top.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};

use plog_core::repositories::{TokenRepository, UserRepository};
use plog_core::services::{AuthGate, TokenService};
use plog_infra::DatabasePool;
use plog_shared::config::{AuthConfig, CookieConfig};

use crate::middleware::JwtAuth;
use crate::routes::auth::{logout, me, refresh};

/// State shared by every handler
pub struct AppState<R: TokenRepository, U: UserRepository> {
    pub token_service: Arc<TokenService<R, U>>,
    pub auth_gate: AuthGate,
    pub cookies: CookieConfig,
    /// Issue a new refresh token (and revoke the old one) on every refresh
    pub rotate_refresh_tokens: bool,
}

impl<R, U> AppState<R, U>
where
    R: TokenRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(token_service: Arc<TokenService<R, U>>, auth: &AuthConfig) -> Self {
        let auth_gate = AuthGate::new(token_service.clone());
        Self {
            token_service,
            auth_gate,
            cookies: auth.cookies.clone(),
            rotate_refresh_tokens: auth.jwt.rotate_refresh_tokens,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, U>(
    app_state: web::Data<AppState<R, U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: TokenRepository + 'static,
    U: UserRepository + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.auth_gate.clone());

    App::new()
        .app_data(app_state)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/refresh", web::post().to(refresh::<R, U>))
                    .route("/logout", web::post().to(logout::<R, U>))
                    .service(
                        web::resource("/me")
                            .wrap(jwt_auth)
                            .route(web::get().to(me)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports the database pool when one is registered as app data; answers
/// 503 if the pool cannot run a query.
async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let (healthy, database) = match pool {
        Some(pool) => {
            let up = matches!(pool.health_check().await, Ok(true));
            let stats = pool.get_statistics();
            if !up {
                tracing::warn!(%stats, "Database unavailable");
            }
            let database = serde_json::json!({
                "status": if up { "up" } else { "down" },
                "connections": stats.connections,
                "idle_connections": stats.idle_connections,
                "max_connections": stats.max_connections,
            });
            (up, database)
        }
        None => (true, serde_json::Value::Null),
    };

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "p-log-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(plog_shared::ErrorResponse::new(
        plog_shared::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
