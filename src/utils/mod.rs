//! Utility functions shared across the application.
//!
//! - [`base62`] - id ↔ short code conversion
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`alias`] - custom alias validation
//! - [`db_error`] - Postgres constraint inspection

pub mod alias;
pub mod base62;
pub mod db_error;
pub mod url_normalizer;
