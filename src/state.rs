//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;

/// When and for how long redirect targets are cached.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// A mapping is cached once its click count reaches this value.
    /// Keeps long-tail links out of the cache.
    pub popularity_threshold: i64,
    /// TTL applied to cached redirect targets.
    pub ttl_seconds: u64,
}

/// Fixed-window request budget enforced through the cache counter.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub max_requests: i64,
    pub window_seconds: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkService>,
    pub cache: Arc<dyn CacheService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
    pub cache_policy: CachePolicy,
    pub rate_limit: RateLimitPolicy,
}
