//! Central application error type and HTTP mapping.
//!
//! Every error returned to a client is rendered as a JSON envelope:
//!
//! ```json
//! { "error": { "code": "alias_taken", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// Variants map 1:1 to HTTP statuses in [`IntoResponse`]. Cache failures are
/// deliberately absent: the cache degrades to the store path and never
/// produces a client-visible error.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or unsupported URL submitted to the shorten endpoint (400).
    InvalidUrl { message: String, details: Value },
    /// Requested custom alias collides with an existing alias or encoded id (400).
    AliasTaken { details: Value },
    /// Any other request validation failure (400).
    Validation { message: String, details: Value },
    /// Unknown, undecodable, or deactivated short code (404).
    NotFound { message: String, details: Value },
    /// Client exceeded the request budget for the current window (429).
    RateLimited { details: Value },
    /// Database connection or timeout failure (503).
    Unavailable { message: String, details: Value },
    /// Unexpected failure (500).
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn alias_taken(details: Value) -> Self {
        Self::AliasTaken { details }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited(details: Value) -> Self {
        Self::RateLimited { details }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::AliasTaken { .. }
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::InvalidUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_url", message, details)
            }
            AppError::AliasTaken { details } => (
                StatusCode::BAD_REQUEST,
                "alias_taken",
                "Custom alias is already taken".to_string(),
                details,
            ),
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::RateLimited { details } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Rate limit exceeded".to_string(),
                details,
            ),
            AppError::Unavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidUrl { message, .. } => write!(f, "invalid url: {message}"),
            AppError::AliasTaken { .. } => write!(f, "custom alias is already taken"),
            AppError::Validation { message, .. } => write!(f, "validation error: {message}"),
            AppError::NotFound { message, .. } => write!(f, "not found: {message}"),
            AppError::RateLimited { .. } => write!(f, "rate limit exceeded"),
            AppError::Unavailable { message, .. } => write!(f, "store unavailable: {message}"),
            AppError::Internal { message, .. } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                if crate::utils::db_error::is_alias_constraint(db.constraint()) {
                    return AppError::alias_taken(json!({ "constraint": db.constraint() }));
                }
                return AppError::internal(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
            tracing::error!("Database error: {db}");
            return AppError::internal("Database error", json!({}));
        }

        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::error!("Database unavailable: {e}");
                AppError::unavailable("Database unavailable", json!({}))
            }
            other => {
                tracing::error!("Database error: {other}");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
