//! Custom alias validation.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Compiled pattern for acceptable aliases: 3-20 characters, letters,
/// digits, underscore, hyphen.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").unwrap());

/// Aliases that collide with service routes and cannot be claimed.
const RESERVED_ALIASES: &[&str] = &["api", "health", "stats", "links", "shorten", "admin"];

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: letters, digits, underscore, hyphen
/// - Cannot be a reserved route word (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] when a rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Custom alias must be 3-20 characters (letters, numbers, _, -)",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES
        .iter()
        .any(|reserved| alias.eq_ignore_ascii_case(reserved))
    {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
