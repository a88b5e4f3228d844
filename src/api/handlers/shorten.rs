//! Handler for the shorten endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "custom_alias": "promo" }
/// ```
///
/// `custom_alias` is optional; without it the short code is derived from the
/// new row's id.
///
/// # Responses
///
/// - **201 Created** with `{short_code, short_url, original_url}`
/// - **400 Bad Request** for an invalid URL or a taken alias
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let mapping = state
        .links
        .shorten(payload.url, payload.custom_alias)
        .await?;

    let short_code = mapping.short_code();
    let response = ShortenResponse {
        short_url: state.links.short_url(&short_code),
        short_code,
        original_url: mapping.original_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
