//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache of short key → long URL mappings.
///
/// The cache is an accelerator only. It is never consulted for authorization
/// decisions, and callers treat every error as a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL cached for a short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL in seconds.
    ///
    /// `None` uses the implementation's default TTL.
    async fn set_url(
        &self,
        short_key: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping.
    ///
    /// Used when a link is revoked.
    async fn invalidate(&self, short_key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
