//! HTTP server initialization and runtime setup.
//!
//! Handles link store selection, cache setup, service wiring, and the Axum
//! server lifecycle.

use crate::application::services::{CodeAllocator, QrCodeService};
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{NullCache, RedisCache, ResolutionCache};
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on PostgreSQL.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Code allocator, resolver and QR service
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let links = build_link_repository(&config).await?;
    let cache = build_cache(&config).await;

    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let allocator = CodeAllocator::new(links.clone(), generator, config.allocator_settings());
    let qr_service = QrCodeService::new(&config.qr_api_url)?;

    let state = AppState::new(
        links,
        cache,
        allocator,
        qr_service,
        config.base_url.clone(),
        config.home_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the link store selected by `STORE_BACKEND`.
///
/// For PostgreSQL the connection is retried with exponential backoff and
/// pending migrations are applied before the store is returned.
///
/// # Errors
///
/// Returns an error if the database stays unreachable or a migration fails.
pub async fn build_link_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Ok(Arc::new(InMemoryLinkRepository::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;

            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply database migrations")?;

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
    }
}

/// Delays between database connection attempts; the first attempt is immediate.
fn connect_backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1)
}

async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    Retry::start(connect_backoff(), || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

async fn build_cache(config: &Config) -> Arc<dyn ResolutionCache> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections..."),
        Err(e) => tracing::warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}
