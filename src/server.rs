//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, connects the cache, wires services into
//! [`AppState`], and runs the Axum server until a shutdown signal arrives.

use crate::application::services::{IdAllocator, MappingService, UrlValidator};
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::dns::SystemResolver;
use crate::infrastructure::persistence::{
    MemoryMappingRepository, PgMappingRepository, connect_pool, run_migrations,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Creates the mapping repository chosen by configuration.
///
/// With a database URL, a lazily-connecting PostgreSQL pool is created and
/// migrations are applied. Without one, an in-memory repository is returned.
///
/// # Errors
///
/// Returns an error if the database URL is malformed or migrations cannot be
/// applied after retrying.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    match config.database_url {
        Some(ref database_url) => {
            let pool = connect_pool(database_url, config.pool_settings())
                .context("Invalid database configuration")?;
            run_migrations(&pool)
                .await
                .context("Failed to apply database migrations")?;
            tracing::info!("Storage: PostgreSQL");
            Ok(Arc::new(PgMappingRepository::new(Arc::new(pool))))
        }
        None => {
            tracing::warn!(
                "No database configured. Mappings are kept in memory and lost on restart."
            );
            Ok(Arc::new(MemoryMappingRepository::new()))
        }
    }
}

/// Connects the redirect cache, falling back to [`NullCache`].
///
/// Redis is only used in front of PostgreSQL. With in-memory storage a shared
/// or surviving cache would map reissued ids to URLs from an earlier process.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(ref redis_url) = config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    if !config.is_durable() {
        tracing::warn!("Redis is configured but storage is in memory. Using NullCache.");
        return Arc::new(NullCache::new());
    }

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
}

/// Builds the shared state from configuration.
///
/// # Errors
///
/// See [`build_repository`].
pub async fn build_state(config: &Config) -> Result<AppState> {
    let repository = build_repository(config).await?;
    let cache = build_cache(config).await;

    let validator = Arc::new(UrlValidator::new(
        Arc::new(SystemResolver::new()),
        config.resolve_timeout(),
    ));
    let mapping_service = Arc::new(MappingService::new(
        repository,
        IdAllocator::new(config.id_strategy),
    ));

    Ok(AppState::new(validator, mapping_service, cache))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Storage setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state, &config.public_dir);

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

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
