//! Repository trait for url mapping data access.

use crate::domain::entities::{NewUrl, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the url store.
///
/// Lookups used by the redirect and stats paths only ever return active
/// rows; a soft-deleted mapping behaves as if it did not exist.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - In-memory fakes live with the integration tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping and returns the stored row with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasTaken`] when the alias unique constraint
    /// fires, [`AppError::Unavailable`] on connection failure, and
    /// [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_url: NewUrl) -> Result<UrlMapping, AppError>;

    /// Finds an active mapping by custom alias.
    async fn find_active_by_alias(&self, alias: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds an active mapping by row id.
    async fn find_active_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError>;

    /// Whether any mapping (active or not) holds this alias.
    async fn alias_exists(&self, alias: &str) -> Result<bool, AppError>;

    /// Whether a mapping with this row id exists (active or not).
    async fn id_exists(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically increments the click counter of an active mapping.
    ///
    /// Performed as a single `UPDATE ... SET click_count = click_count + 1`
    /// so concurrent redirects never lose updates. Returns the new count, or
    /// `None` when the row is missing or no longer active.
    async fn increment_click_count(&self, id: i64) -> Result<Option<i64>, AppError>;

    /// Soft-deletes a mapping by clearing `is_active`.
    ///
    /// Returns `true` when a row transitioned from active to inactive.
    async fn deactivate(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
