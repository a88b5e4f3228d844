//! Click entity representing a single redirect event.

/// Upper bounds on stored request metadata. Longer values are clamped, not
/// rejected; the click log has no validation contract beyond size.
pub const MAX_IP_LEN: usize = 64;
pub const MAX_USER_AGENT_LEN: usize = 512;
pub const MAX_REFERER_LEN: usize = 2048;

/// Input data for appending one click-log row.
///
/// All metadata fields are optional; clients may omit any header and
/// privacy tooling frequently strips them.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub url_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl NewClick {
    /// Builds a click record, clamping metadata to the storage size limits.
    pub fn new(
        url_id: i64,
        ip_address: Option<String>,
        user_agent: Option<String>,
        referer: Option<String>,
    ) -> Self {
        Self {
            url_id,
            ip_address: ip_address.map(|s| clamp(s, MAX_IP_LEN)),
            user_agent: user_agent.map(|s| clamp(s, MAX_USER_AGENT_LEN)),
            referer: referer.map(|s| clamp(s, MAX_REFERER_LEN)),
        }
    }
}

fn clamp(s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut s = s;
    s.truncate(end);
    s
}
