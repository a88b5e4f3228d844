//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`             - short link redirect (public)
//! - `GET    /health`             - component health check (public)
//! - `POST   /api/shorten`        - create a short link
//! - `GET    /api/stats/{code}`   - link statistics
//! - `DELETE /api/links/{code}`   - deactivate a link
//!
//! # Middleware
//!
//! - Structured request/response tracing on every route
//! - Cache-backed per-IP rate limiting on `/api`
//! - Trailing slash normalization

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
