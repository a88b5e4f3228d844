//! Repository trait for the append-only click log.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording redirect events.
///
/// The click log is best-effort: callers (the background worker) log and
/// drop failures rather than propagating them to the redirecting client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click-log row.
    async fn record(&self, click: NewClick) -> Result<(), AppError>;
}
