//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of resolved `short_id -> original_url` pairs.
///
/// Durable mappings never change once created, so entries never need
/// invalidation and the TTL only bounds memory use. In-memory storage reissues
/// ids after a restart, so a cache is only placed in front of PostgreSQL.
/// Implementations are fail-open: a broken cache behaves like an empty one.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached URL for a short id.
    ///
    /// `Ok(None)` on a miss. Backend errors are logged and reported as misses.
    async fn get_url(&self, short_id: i64) -> CacheResult<Option<String>>;

    /// Stores a URL for a short id. `ttl_seconds = None` uses the configured default.
    async fn set_url(
        &self,
        short_id: i64,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short label for health output.
    fn name(&self) -> &'static str;
}
