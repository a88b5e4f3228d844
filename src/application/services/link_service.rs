//! Link creation, resolution, and lifecycle service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUrl, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias::validate_custom_alias;
use crate::utils::base62;
use crate::utils::url_normalizer::{UrlNormalizationError, normalize_url};

/// Service for creating and resolving shortened links.
///
/// Short codes are never generated randomly: a mapping's code is either the
/// caller's custom alias or the base62 encoding of the database-assigned row
/// id, which is collision-free by construction.
pub struct LinkService {
    urls: Arc<dyn UrlRepository>,
    base_url: String,
}

impl LinkService {
    pub fn new(urls: Arc<dyn UrlRepository>, base_url: String) -> Self {
        Self { urls, base_url }
    }

    /// Creates a new mapping for a long URL.
    ///
    /// Normalizes the URL, validates the optional alias, and rejects aliases
    /// that collide with an existing alias or with the derived code of an
    /// existing row id. Two concurrent requests for the same alias race to
    /// the unique constraint, which maps to the same [`AppError::AliasTaken`].
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] for a malformed URL or unsupported scheme
    /// - [`AppError::Validation`] for a malformed alias
    /// - [`AppError::AliasTaken`] for an alias conflict
    pub async fn shorten(
        &self,
        url: String,
        custom_alias: Option<String>,
    ) -> Result<UrlMapping, AppError> {
        let normalized = normalize_url(&url).map_err(|e| match e {
            UrlNormalizationError::UnsupportedProtocol => AppError::invalid_url(
                "Only HTTP and HTTPS URLs are allowed",
                json!({ "url": url }),
            ),
            other => {
                AppError::invalid_url("Invalid URL format", json!({ "reason": other.to_string() }))
            }
        })?;

        if let Some(alias) = &custom_alias {
            validate_custom_alias(alias)?;

            if self.urls.alias_exists(alias).await? {
                return Err(AppError::alias_taken(json!({ "alias": alias })));
            }

            // An alias made only of alphabet symbols decodes to an integer;
            // if a row with that id exists the alias would shadow its
            // derived code.
            if let Ok(id) = base62::decode(alias) {
                if self.urls.id_exists(id).await? {
                    return Err(AppError::alias_taken(
                        json!({ "alias": alias, "shadows_id": id }),
                    ));
                }
            }
        }

        self.urls
            .insert(NewUrl {
                original_url: normalized,
                custom_alias,
            })
            .await
    }

    /// Resolves a short code to its active mapping.
    ///
    /// Aliases are checked before base62 decoding, so an alias always wins
    /// over a numerically colliding code. Undecodable codes, unknown ids,
    /// and deactivated rows all surface as the same not-found error.
    pub async fn resolve(&self, code: &str) -> Result<UrlMapping, AppError> {
        if let Some(mapping) = self.urls.find_active_by_alias(code).await? {
            return Ok(mapping);
        }

        if let Ok(id) = base62::decode(code) {
            if let Some(mapping) = self.urls.find_active_by_id(id).await? {
                return Ok(mapping);
            }
        }

        Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ))
    }

    /// Atomically increments the click counter for a successful redirect.
    ///
    /// Returns the new count, or `None` when the mapping was deactivated
    /// between resolution and increment.
    pub async fn register_click(&self, url_id: i64) -> Result<Option<i64>, AppError> {
        self.urls.increment_click_count(url_id).await
    }

    /// Soft-deletes the mapping behind a short code.
    ///
    /// Returns the (previously active) mapping so callers can invalidate
    /// derived state such as cache entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code does not resolve to an
    /// active mapping.
    pub async fn deactivate(&self, code: &str) -> Result<UrlMapping, AppError> {
        let mapping = self.resolve(code).await?;
        self.urls.deactivate(mapping.id).await?;
        Ok(mapping)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Store connectivity check for the health endpoint.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.urls.ping().await
    }
}
