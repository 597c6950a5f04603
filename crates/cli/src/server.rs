//! # Server Startup
//!
//! Connects the backing services, runs migrations, and serves the API
//! until shutdown.

use auth::JwtConfig;
use error::Result;
use migration::MigratorTrait;
use server::{create_app_router, AppState};

use crate::config::{parse_socket_addr, Settings};

/// Starts the API server on the given address.
pub async fn run(settings: &Settings, host: &str, port: u16) -> Result<()> {
    logging::info!(target: "serve", "Connecting to database...");
    let db = migration::connect_to_database(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    logging::info!(target: "serve", "Running database migrations...");
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let redis = redis::Client::open(settings.redis_url.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid Redis URL: {}", e))?;

    let state = AppState {
        db,
        jwt_config: JwtConfig::new(&settings.jwt_secret),
        redis,
    };

    let addr = parse_socket_addr(host, port).map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    logging::info!(target: "serve", address = %addr, "API server listening");

    axum::serve(listener, create_app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        logging::error!(target: "serve", "Failed to listen for shutdown signal");
    }
    logging::info!(target: "serve", "Shutdown signal received");
}
