//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Namespace prefix of every key written by this service.
pub const KEY_PREFIX: &str = "url:";

/// Redis cache implementation for fast URL lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnects.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set_url`] gets `None`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn build_key(short_key: &str) -> String {
        format!("{}{}", KEY_PREFIX, short_key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let key = Self::build_key(short_key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!(short_key, "Cache HIT");
                Ok(Some(url))
            }
            Ok(None) => {
                debug!(short_key, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(short_key, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_key: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = Self::build_key(short_key);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(&key, long_url, ttl).await {
            Ok(_) => {
                debug!(short_key, ttl, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(short_key, error = %e, "Redis SET failed");
                Ok(())
            }
        }
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        let key = Self::build_key(short_key);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(short_key, "Cache INVALIDATE");
                }
                Ok(())
            }
            Err(e) => {
                warn!(short_key, error = %e, "Redis DEL failed");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
