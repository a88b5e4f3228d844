//! Click event passed from the redirect handler to the background worker.

/// An in-memory click event for asynchronous persistence.
///
/// Created in the redirect handler once the target is known and handed to a
/// bounded channel with `try_send`: if the queue is full the event is
/// dropped. The click counter is incremented separately and stays exact.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub url_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    pub fn new(
        url_id: i64,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            url_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
