//! Background worker draining the click event queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Consumes click events and appends them to the click log.
///
/// Runs until the channel closes. Insert failures are logged and the event
/// is dropped; redirect responses never depend on this path.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(event) = rx.recv().await {
        let url_id = event.url_id;
        let click = NewClick::new(url_id, event.ip, event.user_agent, event.referer);

        match clicks.record(click).await {
            Ok(()) => debug!("Recorded click for url {url_id}"),
            Err(e) => warn!("Failed to record click for url {url_id}: {e}"),
        }
    }

    debug!("Click worker stopped: channel closed");
}
