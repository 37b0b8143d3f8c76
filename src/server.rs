//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, cache setup, the optional
//! auto-revoke task and the Axum server lifecycle.

use crate::application::services::url_service::CACHE_TTL_SECONDS;
use crate::application::services::{AuthService, UrlService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgShortLinkRepository, PgTokenRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::sweeper::spawn_auto_revoke_task;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Creates the PostgreSQL pool from the configured pool settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");
    Ok(pool)
}

/// Applies the embedded SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database migrations applied");
    Ok(())
}

/// Connects Redis if configured, falling back to [`NullCache`].
///
/// A Redis failure at startup is not fatal; the service runs uncached.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, CACHE_TTL_SECONDS).await {
        Ok(redis) => {
            info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to Redis, using NullCache");
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Redis cache (or NullCache fallback)
/// - Auto-revoke task, when `AUTO_REVOKE_INTERVAL_SECONDS` > 0
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    run_migrations(&pool).await?;

    let cache = connect_cache(&config).await;

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgShortLinkRepository::new(pool.clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool));

    let url_service = Arc::new(UrlService::new(
        link_repository,
        cache.clone(),
        config.link_policy(),
    ));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));

    let sweeper = (config.auto_revoke_interval_seconds > 0).then(|| {
        spawn_auto_revoke_task(url_service.clone(), config.auto_revoke_interval_seconds)
    });

    let state = AppState::new(url_service, auth_service, cache, config.app_name.clone());
    let app = app_router(state, config.require_auth);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
