//! Research-interest classification against the fixed category taxonomy.

use crate::config::taxonomy;

/// Classify free-text interests and search keywords into taxonomy category
/// keys.
///
/// All inputs are concatenated into one lower-cased blob; a category matches
/// when any of its trigger phrases occurs as a substring. Categories are
/// tested independently, so multiple keys may match. Output preserves the
/// taxonomy's insertion order. No match yields an empty vec, not an error.
#[must_use]
pub fn classify(interests: &[String], search_keywords: &[String]) -> Vec<&'static str> {
    let blob = interests
        .iter()
        .chain(search_keywords)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if blob.is_empty() {
        return Vec::new();
    }

    taxonomy::CATEGORIES
        .iter()
        .filter(|(_, phrases)| phrases.iter().any(|phrase| blob.contains(phrase)))
        .map(|(key, _)| *key)
        .collect()
}
