//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, CachedTarget};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache for redirect targets and rate-limit counters.
///
/// Uses `ConnectionManager` for automatic reconnects. Every command runs
/// under a timeout; a timeout or error on the read path is reported as a
/// miss and writes are logged and dropped, so the caller never blocks on a
/// degraded cache beyond `op_timeout`.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - connection string (e.g. `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when `set_target` is called
    ///   without an override
    /// - `op_timeout` - per-command deadline; an expired deadline is a miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        default_ttl_seconds: u64,
        op_timeout: Duration,
    ) -> CacheResult<Self> {
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
            op_timeout,
            key_prefix: "url:".to_string(),
        })
    }

    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }

    /// Fetches and deserializes one cached target, without retry.
    async fn fetch_target(&self, key: &str) -> Result<Option<CachedTarget>, String> {
        let mut conn = self.client.clone();

        let raw = tokio::time::timeout(self.op_timeout, conn.get::<_, Option<String>>(key))
            .await
            .map_err(|_| "timed out".to_string())?
            .map_err(|e| e.to_string())?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| format!("corrupt cache entry: {e}")),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_target(&self, short_code: &str) -> CacheResult<Option<CachedTarget>> {
        let key = self.build_key(short_code);

        // One retry on a transient failure, then degrade to a miss.
        for attempt in 0..2 {
            match self.fetch_target(&key).await {
                Ok(Some(target)) => {
                    debug!("Cache HIT: {}", short_code);
                    return Ok(Some(target));
                }
                Ok(None) => {
                    debug!("Cache MISS: {}", short_code);
                    return Ok(None);
                }
                Err(e) if attempt == 0 => {
                    warn!("Redis GET error for {} (retrying): {}", short_code, e);
                }
                Err(e) => {
                    error!("Redis GET error for {}: {}", short_code, e);
                }
            }
        }

        Ok(None)
    }

    async fn set_target(
        &self,
        short_code: &str,
        target: &CachedTarget,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        let json = match serde_json::to_string(target) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize cache entry for {}: {}", short_code, e);
                return Ok(());
            }
        };

        let mut conn = self.client.clone();
        match tokio::time::timeout(self.op_timeout, conn.set_ex::<_, _, ()>(&key, json, ttl)).await
        {
            Ok(Ok(())) => {
                debug!("Cache SET: {} (TTL: {}s)", short_code, ttl);
            }
            Ok(Err(e)) => warn!("Redis SET error for {}: {}", short_code, e),
            Err(_) => warn!("Redis SET timed out for {}", short_code),
        }

        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        match tokio::time::timeout(self.op_timeout, conn.del::<_, i32>(&key)).await {
            Ok(Ok(deleted)) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", short_code);
                }
            }
            Ok(Err(e)) => warn!("Redis DEL error for {}: {}", short_code, e),
            Err(_) => warn!("Redis DEL timed out for {}", short_code),
        }

        Ok(())
    }

    async fn increment(&self, key: &str, window_seconds: u64) -> CacheResult<Option<i64>> {
        let mut conn = self.client.clone();

        let count =
            match tokio::time::timeout(self.op_timeout, conn.incr::<_, _, i64>(key, 1)).await {
                Ok(Ok(count)) => count,
                Ok(Err(e)) => {
                    warn!("Redis INCR error for {}: {}", key, e);
                    return Ok(None);
                }
                Err(_) => {
                    warn!("Redis INCR timed out for {}", key);
                    return Ok(None);
                }
            };

        // First hit in the window starts its expiry clock.
        if count == 1 {
            if let Ok(Err(e)) = tokio::time::timeout(
                self.op_timeout,
                conn.expire::<_, ()>(key, window_seconds as i64),
            )
            .await
            {
                warn!("Redis EXPIRE error for {}: {}", key, e);
            }
        }

        Ok(Some(count))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(
            tokio::time::timeout(self.op_timeout, conn.ping::<()>()).await,
            Ok(Ok(()))
        )
    }
}
