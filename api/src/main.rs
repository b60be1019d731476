use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use plog_api::{create_app, telemetry, AppState};
use plog_core::services::{TokenService, TokenServiceConfig};
use plog_infra::{DatabasePool, PgTokenRepository, PgUserRepository};
use plog_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    tracing::info!(environment = %config.environment, "Starting p-log API server");

    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to database")?;

    let token_service = Arc::new(TokenService::new(
        PgTokenRepository::new(pool.get_pool().clone()),
        PgUserRepository::new(pool.get_pool().clone()),
        TokenServiceConfig::from(&config.auth.jwt),
    ));
    let app_state = web::Data::new(AppState::new(token_service, &config.auth));
    let pool_data = web::Data::new(pool.clone());

    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();
    tracing::info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone())
            .app_data(pool_data.clone())
            .app_data(web::JsonConfig::default().limit(server_config.max_payload_size))
            .wrap(TracingLogger::default())
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
