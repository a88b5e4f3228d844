//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for a short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// The click count reflects the authoritative per-row counter, not the click
/// log, so it is exact even while log writes are still in flight.
///
/// # Errors
///
/// Returns 404 for unknown, undecodable, or deactivated codes.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let mapping = state.links.resolve(&code).await?;
    Ok(Json(StatsResponse::from_mapping(&mapping)))
}
