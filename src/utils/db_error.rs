//! Postgres constraint inspection helpers.

/// Unique constraint Postgres assigns to the nullable-unique alias column.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "urls_custom_alias_key";

/// Returns true when a unique-violation constraint name refers to the
/// `urls.custom_alias` column.
pub fn is_alias_constraint(constraint: Option<&str>) -> bool {
    matches!(constraint, Some(ALIAS_UNIQUE_CONSTRAINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_alias_constraint() {
        assert!(is_alias_constraint(Some("urls_custom_alias_key")));
        assert!(!is_alias_constraint(Some("clicks_url_id_fkey")));
        assert!(!is_alias_constraint(None));
    }
}
