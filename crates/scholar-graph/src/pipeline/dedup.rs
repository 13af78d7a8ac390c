//! Researcher deduplication across search passes.

use std::collections::HashSet;

use crate::models::EnrichedResearcher;
use crate::text;

/// Collapse records referring to the same person, first occurrence wins.
///
/// One streaming pass over the input with two seen-sets: scholar ids and
/// normalized names. A record is skipped when its non-empty scholar id was
/// already seen, or when its normalized name was already seen — the name
/// check applies even when the scholar ids differ or are absent, so any two
/// same-named researchers in a batch collapse to one. Accepted records are
/// emitted unchanged, in input order.
#[must_use]
pub fn deduplicate(records: Vec<EnrichedResearcher>) -> Vec<EnrichedResearcher> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        let scholar_id = record.scholar_id.trim();
        let name_key = text::normalized_name(&record.name);

        if !scholar_id.is_empty() && seen_ids.contains(scholar_id) {
            continue;
        }
        if seen_names.contains(&name_key) {
            continue;
        }

        if !scholar_id.is_empty() {
            seen_ids.insert(scholar_id.to_string());
        }
        seen_names.insert(name_key);
        unique.push(record);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scholar_id: &str, name: &str) -> EnrichedResearcher {
        EnrichedResearcher {
            scholar_id: scholar_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let out = deduplicate(vec![record("a1", "Jane Smith"), record("a1", "J. Smith")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Jane Smith");
    }

    #[test]
    fn test_same_name_collapses_even_with_different_ids() {
        let out = deduplicate(vec![record("a1", "Jane Smith"), record("b2", "jane smith")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].scholar_id, "a1");
    }

    #[test]
    fn test_name_collapse_is_case_and_whitespace_insensitive() {
        let out = deduplicate(vec![record("", "  Jane   SMITH "), record("", "Jane Smith")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_first_occurrence_wins_and_order_preserved() {
        let out = deduplicate(vec![
            record("a1", "Alice"),
            record("b2", "Bob"),
            record("a1", "Alice Again"),
            record("c3", "Carol"),
        ]);
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_empty_ids_never_collide_by_id() {
        let out = deduplicate(vec![record("", "Alice"), record("", "Bob")]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            record("a1", "Alice"),
            record("", "alice"),
            record("b2", "Bob"),
            record("b2", "Bobby"),
        ];
        let once = deduplicate(input);
        let twice = deduplicate(once.clone());
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.scholar_id, b.scholar_id);
            assert_eq!(a.name, b.name);
        }
    }
}
