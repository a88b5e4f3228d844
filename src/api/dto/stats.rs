//! DTOs for the stats endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;

/// Statistics for one short link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl StatsResponse {
    pub fn from_mapping(mapping: &UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code(),
            original_url: mapping.original_url.clone(),
            click_count: mapping.click_count,
            created_at: mapping.created_at,
            is_active: mapping.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mapping_derives_code() {
        let mapping = UrlMapping {
            id: 1,
            original_url: "https://example.com/".to_string(),
            custom_alias: None,
            created_at: Utc::now(),
            is_active: true,
            click_count: 3,
        };

        let response = StatsResponse::from_mapping(&mapping);
        assert_eq!(response.short_code, "b");
        assert_eq!(response.click_count, 3);
        assert!(response.is_active);
    }
}
