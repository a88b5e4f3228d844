//! Per-IP rate limiting backed by the cache counter.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;

/// Fixed-window rate limiter for API routes.
///
/// Counts requests per client IP with the cache's windowed counter and
/// rejects with 429 once the budget is exhausted. Fails open: when the
/// counter is unavailable (`NullCache`, Redis down, timeout) every request
/// passes, keeping rate limiting a pure optimization like the cache itself.
pub async fn layer(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = format!("rate:{}", addr.ip());

    match state
        .cache
        .increment(&key, state.rate_limit.window_seconds)
        .await
    {
        Ok(Some(count)) if count > state.rate_limit.max_requests => {
            Err(AppError::rate_limited(json!({
                "limit": state.rate_limit.max_requests,
                "window_seconds": state.rate_limit.window_seconds,
            })))
        }
        // Within budget, or counting unavailable: let the request through.
        _ => Ok(next.run(request).await),
    }
}
