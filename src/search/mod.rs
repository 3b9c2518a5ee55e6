//! Substring search over the decision collection.
//!
//! Search is a linear scan: the collection is small and user-owned, so there
//! is no index to maintain.

use crate::entity::Decision;

/// Normalize a raw query for matching.
///
/// Returns `None` when the query is empty or whitespace-only, meaning "no
/// filter". Otherwise returns the lower-cased query. Surrounding whitespace is
/// kept, so `" db"` only matches text with a space before "db".
pub fn normalize_query(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_lowercase())
    }
}

/// Decisions matching `query`, in their current order.
///
/// An empty query returns every decision unfiltered.
pub fn filter(decisions: &[Decision], query: &str) -> Vec<Decision> {
    match normalize_query(query) {
        None => decisions.to_vec(),
        Some(q) => decisions.iter().filter(|d| d.matches(&q)).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Decision> {
        // Newest first, as the store keeps them
        vec![
            Decision::new("Use Redis", "For caching"),
            Decision::new("Use Postgres", "Better JSON support"),
            Decision::new("Ship on Fridays", ""),
        ]
    }

    #[test]
    fn test_normalize_query_empty() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   \t"), None);
    }

    #[test]
    fn test_normalize_query_lowercases() {
        assert_eq!(normalize_query("JSON"), Some("json".to_string()));
        assert_eq!(normalize_query(" Db "), Some(" db ".to_string()));
    }

    #[test]
    fn test_filter_empty_query_returns_all_in_order() {
        let decisions = sample();
        let results = filter(&decisions, "");
        assert_eq!(results, decisions);

        let results = filter(&decisions, "   ");
        assert_eq!(results, decisions);
    }

    #[test]
    fn test_filter_matches_decision_text() {
        let decisions = sample();
        let results = filter(&decisions, "postgres");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].decision, "Use Postgres");
    }

    #[test]
    fn test_filter_matches_context_case_insensitive() {
        let decisions = sample();
        let results = filter(&decisions, "json");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].decision, "Use Postgres");

        let results = filter(&decisions, "CACHING");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].decision, "Use Redis");
    }

    #[test]
    fn test_filter_preserves_order() {
        let decisions = sample();
        let results = filter(&decisions, "use");
        let titles: Vec<&str> = results.iter().map(|d| d.decision.as_str()).collect();
        assert_eq!(titles, vec!["Use Redis", "Use Postgres"]);
    }

    #[test]
    fn test_filter_no_match() {
        let decisions = sample();
        assert!(filter(&decisions, "kubernetes").is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let decisions = sample();
        let before = decisions.clone();
        let _ = filter(&decisions, "redis");
        assert_eq!(decisions, before);
    }
}
