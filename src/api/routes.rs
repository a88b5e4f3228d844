//! API route configuration.

use axum::routing::{delete, get, post};
use axum::{Router, middleware};

use crate::api::handlers::{deactivate_handler, shorten_handler, stats_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;

/// Routes mounted under `/api`, all behind the rate limiter.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/links/{code}", delete(deactivate_handler))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer))
}
