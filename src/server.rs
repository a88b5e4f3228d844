//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cache selection, worker spawning,
//! and the Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::{Config, mask_connection_string};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgClickRepository, PgUrlRepository};
use crate::routes::app_router;
use crate::state::{AppState, CachePolicy, RateLimitPolicy};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool and embedded migrations
/// - Redis cache, falling back to [`NullCache`] when unconfigured or unreachable
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, address bind,
/// or server runtime fail. A cache failure is not an error.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        "Connected to {}",
        mask_connection_string(&config.database_url)
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn CacheService> = match &config.redis_url {
        Some(redis_url) => {
            match RedisCache::connect(
                redis_url,
                config.cache_ttl_seconds,
                Duration::from_millis(config.cache_op_timeout_ms),
            )
            .await
            {
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
        None => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    };

    let pool = Arc::new(pool);
    let url_repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(pool.clone()));
    let click_repository: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository));
    tracing::info!("Click worker started");

    let links = Arc::new(LinkService::new(url_repository, config.base_url.clone()));

    let state = AppState {
        links,
        cache,
        click_tx,
        cache_policy: CachePolicy {
            popularity_threshold: config.cache_popularity_threshold,
            ttl_seconds: config.cache_ttl_seconds,
        },
        rate_limit: RateLimitPolicy {
            max_requests: config.rate_limit_max_requests,
            window_seconds: config.rate_limit_window_seconds,
        },
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
