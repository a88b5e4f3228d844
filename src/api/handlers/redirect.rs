//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CachedTarget;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check the cache for the target (miss or cache error falls through to
///    the store)
/// 2. On miss, resolve the code through the store
/// 3. Atomically increment the click counter; a row deactivated in the
///    meantime (including a stale cache entry) turns into 404
/// 4. Once the count reaches the popularity threshold, write the target to
///    the cache in the background
/// 5. Enqueue a click event for the background worker (fire-and-forget)
/// 6. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 for unknown, undecodable, or deactivated codes and 503 when
/// the store is unreachable. Cache failures never fail the request.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let (target, cache_hit) = match state.cache.get_target(&code).await {
        Ok(Some(cached)) => {
            debug!("Cache HIT for {code}");
            (cached, true)
        }
        Ok(None) => {
            let mapping = state.links.resolve(&code).await?;
            (
                CachedTarget {
                    url_id: mapping.id,
                    original_url: mapping.original_url,
                },
                false,
            )
        }
        Err(e) => {
            error!("Cache error for {code}: {e}");
            let mapping = state.links.resolve(&code).await?;
            (
                CachedTarget {
                    url_id: mapping.id,
                    original_url: mapping.original_url,
                },
                false,
            )
        }
    };

    // The increment doubles as an activity check: it only touches active
    // rows, so a stale cache entry for a deactivated link cannot redirect.
    let Some(click_count) = state.links.register_click(target.url_id).await? else {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    };

    if !cache_hit && click_count >= state.cache_policy.popularity_threshold {
        let cache = state.cache.clone();
        let cache_code = code.clone();
        let cache_target = target.clone();
        let ttl = state.cache_policy.ttl_seconds;
        tokio::spawn(async move {
            if let Err(e) = cache
                .set_target(&cache_code, &cache_target, Some(ttl))
                .await
            {
                error!("Failed to cache target for {cache_code}: {e}");
            }
        });
    }

    let click_event = ClickEvent::new(
        target.url_id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let _ = state.click_tx.try_send(click_event);

    // 301, not axum's Redirect::permanent (which is a 308).
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, target.original_url)],
    ))
}
