//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend, wires the service and runs the Axum server
//! until a shutdown signal arrives.

use crate::application::services::MiniUrlService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::MiniUrlRepository;
use crate::infrastructure::persistence::{InMemoryMiniUrlRepository, PgMiniUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_generator::KeyGenerator;
use crate::utils::url_validator::DefaultUrlValidator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Key generator and mini URL service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The key generator configuration is invalid
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let mini_url_service = Arc::new(build_service(&config).await?);
    let state = AppState::new(mini_url_service);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the mini URL service for the configured storage backend.
pub async fn build_service(config: &Config) -> Result<MiniUrlService> {
    let key_generator = KeyGenerator::new(&config.key_alphabet, config.key_length)
        .context("Invalid key generator configuration")?;

    let repository: Arc<dyn MiniUrlRepository> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;
            let pool = connect_pool(config, database_url).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations applied");

            Arc::new(PgMiniUrlRepository::new(Arc::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            Arc::new(InMemoryMiniUrlRepository::new())
        }
    };

    Ok(MiniUrlService::new(
        repository,
        Arc::new(DefaultUrlValidator),
        key_generator,
        config.max_key_attempts,
    ))
}

/// Opens a PostgreSQL pool using the configured limits.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
