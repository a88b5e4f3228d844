//! No-op cache for environments without Redis.

use super::service::{CacheResult, CacheService, CachedTarget};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup is a miss and every write succeeds without storing anything,
/// so the store alone carries all correctness guarantees. The rate-limit
/// counter reports unavailable, which disables rate limiting.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_target(&self, _short_code: &str) -> CacheResult<Option<CachedTarget>> {
        Ok(None)
    }

    async fn set_target(
        &self,
        _short_code: &str,
        _target: &CachedTarget,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _short_code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn increment(&self, _key: &str, _window_seconds: u64) -> CacheResult<Option<i64>> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        let target = CachedTarget {
            url_id: 1,
            original_url: "https://example.com/".to_string(),
        };
        cache.set_target("b", &target, None).await.unwrap();

        assert_eq!(cache.get_target("b").await.unwrap(), None);
        assert_eq!(cache.increment("rate:1.2.3.4", 60).await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
