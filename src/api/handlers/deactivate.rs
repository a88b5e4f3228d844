//! Handler for soft-deleting a link.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Deactivates a short link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// The row and its click history persist; redirect and stats lookups report
/// not-found from this point on. The cached redirect target is invalidated
/// so a popular link cannot serve stale redirects for its remaining TTL.
///
/// # Responses
///
/// - **204 No Content** on success
/// - **404 Not Found** when the code does not resolve to an active link
pub async fn deactivate_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.links.deactivate(&code).await?;

    if let Err(e) = state.cache.invalidate(&code).await {
        warn!("Failed to invalidate cache for {code}: {e}");
    }

    Ok(StatusCode::NO_CONTENT)
}
