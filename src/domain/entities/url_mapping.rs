//! Url mapping entity representing one shortened link.

use crate::utils::base62;
use chrono::{DateTime, Utc};

/// A shortened link row.
///
/// The short code is derived, not stored: it is the custom alias when one was
/// chosen at creation time, otherwise the base62 encoding of the row id.
#[derive(Debug, Clone)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub click_count: i64,
}

impl UrlMapping {
    /// The effective short code for this mapping.
    pub fn short_code(&self) -> String {
        match &self.custom_alias {
            Some(alias) => alias.clone(),
            None => base62::encode(self.id),
        }
    }
}

/// Input data for creating a new mapping.
///
/// `original_url` must already be normalized and the alias validated.
#[derive(Debug, Clone)]
pub struct NewUrl {
    pub original_url: String,
    pub custom_alias: Option<String>,
}
