#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;

use snaplink::application::services::LinkService;
use snaplink::domain::click_event::ClickEvent;
use snaplink::domain::entities::{NewClick, NewUrl, UrlMapping};
use snaplink::domain::repositories::{ClickRepository, UrlRepository};
use snaplink::error::AppError;
use snaplink::infrastructure::cache::{CacheError, CacheResult, CacheService, CachedTarget};
use snaplink::state::{AppState, CachePolicy, RateLimitPolicy};

pub const TEST_BASE_URL: &str = "https://sn.ap";

/// In-memory url store mirroring the Postgres semantics the handlers rely
/// on: monotonically increasing ids, nullable-unique aliases, atomic
/// increments, soft deletes.
#[derive(Default)]
pub struct MemoryUrlRepository {
    rows: Mutex<Vec<UrlMapping>>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping(&self, id: i64) -> Option<UrlMapping> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Inserts a row directly, bypassing the service, and returns it.
    pub fn seed(&self, original_url: &str, custom_alias: Option<&str>) -> UrlMapping {
        let mut rows = self.rows.lock().unwrap();
        let mapping = UrlMapping {
            id: rows.len() as i64 + 1,
            original_url: original_url.to_string(),
            custom_alias: custom_alias.map(str::to_string),
            created_at: Utc::now(),
            is_active: true,
            click_count: 0,
        };
        rows.push(mapping.clone());
        mapping
    }

    pub fn seed_inactive(&self, original_url: &str) -> UrlMapping {
        let mut rows = self.rows.lock().unwrap();
        let mapping = UrlMapping {
            id: rows.len() as i64 + 1,
            original_url: original_url.to_string(),
            custom_alias: None,
            created_at: Utc::now(),
            is_active: false,
            click_count: 0,
        };
        rows.push(mapping.clone());
        mapping
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlMapping, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if let Some(alias) = &new_url.custom_alias {
            if rows
                .iter()
                .any(|r| r.custom_alias.as_deref() == Some(alias.as_str()))
            {
                return Err(AppError::alias_taken(json!({ "alias": alias })));
            }
        }

        let mapping = UrlMapping {
            id: rows.len() as i64 + 1,
            original_url: new_url.original_url,
            custom_alias: new_url.custom_alias,
            created_at: Utc::now(),
            is_active: true,
            click_count: 0,
        };
        rows.push(mapping.clone());
        Ok(mapping)
    }

    async fn find_active_by_alias(&self, alias: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.is_active && r.custom_alias.as_deref() == Some(alias))
            .cloned())
    }

    async fn find_active_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.is_active && r.id == id)
            .cloned())
    }

    async fn alias_exists(&self, alias: &str) -> Result<bool, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.custom_alias.as_deref() == Some(alias)))
    }

    async fn id_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().iter().any(|r| r.id == id))
    }

    async fn increment_click_count(&self, id: i64) -> Result<Option<i64>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|r| r.is_active && r.id == id)
            .map(|r| {
                r.click_count += 1;
                r.click_count
            }))
    }

    async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|r| r.is_active && r.id == id)
            .map(|r| {
                r.is_active = false;
            })
            .is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory click log.
#[derive(Default)]
pub struct MemoryClickRepository {
    clicks: Mutex<Vec<NewClick>>,
}

impl MemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<NewClick> {
        self.clicks.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn record(&self, click: NewClick) -> Result<(), AppError> {
        self.clicks.lock().unwrap().push(click);
        Ok(())
    }
}

/// Working in-memory cache, for exercising the cache-hit and popularity
/// population paths without Redis.
#[derive(Default)]
pub struct MemoryCache {
    targets: Mutex<HashMap<String, CachedTarget>>,
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self, short_code: &str) -> Option<CachedTarget> {
        self.targets.lock().unwrap().get(short_code).cloned()
    }

    pub fn preload(&self, short_code: &str, target: CachedTarget) {
        self.targets
            .lock()
            .unwrap()
            .insert(short_code.to_string(), target);
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_target(&self, short_code: &str) -> CacheResult<Option<CachedTarget>> {
        Ok(self.targets.lock().unwrap().get(short_code).cloned())
    }

    async fn set_target(
        &self,
        short_code: &str,
        target: &CachedTarget,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.targets
            .lock()
            .unwrap()
            .insert(short_code.to_string(), target.clone());
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.targets.lock().unwrap().remove(short_code);
        Ok(())
    }

    async fn increment(&self, key: &str, _window_seconds: u64) -> CacheResult<Option<i64>> {
        let mut counters = self.counters.lock().unwrap();
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(Some(*count))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// A cache whose every operation fails, simulating an unreachable backend.
pub struct BrokenCache;

#[async_trait]
impl CacheService for BrokenCache {
    async fn get_target(&self, _short_code: &str) -> CacheResult<Option<CachedTarget>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_target(
        &self,
        _short_code: &str,
        _target: &CachedTarget,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn invalidate(&self, _short_code: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn increment(&self, _key: &str, _window_seconds: u64) -> CacheResult<Option<i64>> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub struct TestContext {
    pub state: AppState,
    pub urls: Arc<MemoryUrlRepository>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

/// Builds an [`AppState`] over in-memory fakes.
///
/// The popularity threshold is lowered to 3 so cache-population tests do not
/// need dozens of redirects; the rate limit budget is 5 per window.
pub fn create_test_state(cache: Arc<dyn CacheService>) -> TestContext {
    let urls = Arc::new(MemoryUrlRepository::new());
    let (click_tx, click_rx) = mpsc::channel(100);

    let links = Arc::new(LinkService::new(
        urls.clone() as Arc<dyn UrlRepository>,
        TEST_BASE_URL.to_string(),
    ));

    let state = AppState {
        links,
        cache,
        click_tx,
        cache_policy: CachePolicy {
            popularity_threshold: 3,
            ttl_seconds: 60,
        },
        rate_limit: RateLimitPolicy {
            max_requests: 5,
            window_seconds: 60,
        },
    };

    TestContext {
        state,
        urls,
        click_rx,
    }
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`, which has no real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));
        self.inner.call(req)
    }
}
