//! Cache service trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
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

/// A cached redirect target.
///
/// Carries the row id alongside the URL so a cache hit can still increment
/// the click counter and enqueue a click event without a store lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTarget {
    pub url_id: i64,
    pub original_url: String,
}

/// Trait for caching short code → redirect target mappings.
///
/// The cache is an optimization, never a source of truth: implementations
/// must be fail-open so that any cache failure degrades to the store path
/// with correctness intact.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - always-miss no-op
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the redirect target for a short code.
    ///
    /// Returns `Ok(None)` on miss; implementations also report errors and
    /// timeouts as a miss.
    async fn get_target(&self, short_code: &str) -> CacheResult<Option<CachedTarget>>;

    /// Stores a redirect target with an optional TTL override.
    ///
    /// Failures are logged by the implementation and not propagated.
    async fn set_target(
        &self,
        short_code: &str,
        target: &CachedTarget,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached target, called when a mapping is deactivated.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Atomically increments a windowed counter, used for rate limiting.
    ///
    /// The first increment of a key starts a window of `window_seconds`
    /// after which the counter expires. Returns `Ok(None)` when counting is
    /// unavailable (cache disabled or unreachable); callers must fail open.
    async fn increment(&self, key: &str, window_seconds: u64) -> CacheResult<Option<i64>>;

    /// Whether the cache backend is reachable, for the health endpoint.
    async fn health_check(&self) -> bool;
}
