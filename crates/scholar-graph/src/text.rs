//! Name and e-mail normalization helpers.

/// Academic e-mail domain fragments used by the verification heuristic.
const ACADEMIC_DOMAINS: &[&str] = &[
    ".edu",
    ".ac.",
    ".university",
    ".univ",
    ".college",
    "mit.edu",
    "stanford.edu",
    "harvard.edu",
    "berkeley.edu",
    "cmu.edu",
    "caltech.edu",
    "ethz.ch",
    "epfl.ch",
];

/// Suffixes kept upper-case when formatting a name.
const UPPER_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv"];

/// Deduplication name key: lower-cased, whitespace-trimmed, with inner
/// whitespace runs collapsed so the key is stable across display formatting.
#[must_use]
pub fn normalized_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Format a display name consistently: collapse runs of whitespace and
/// title-case each token, keeping generational suffixes (Jr, III, ...)
/// upper-case.
///
/// Best-effort; particles and non-ASCII names pass through with only the
/// first letter adjusted.
#[must_use]
pub fn format_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| {
            if UPPER_SUFFIXES.contains(&part.to_lowercase().as_str()) {
                part.to_uppercase()
            } else {
                title_case(part)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Check whether an e-mail address looks academic.
#[must_use]
pub fn is_academic_email(email: &str) -> bool {
    if email.trim().is_empty() {
        return false;
    }
    let lower = email.to_lowercase();
    ACADEMIC_DOMAINS.iter().any(|domain| lower.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_name() {
        assert_eq!(normalized_name("  Jane SMITH "), "jane smith");
        assert_eq!(normalized_name("jane smith"), "jane smith");
        assert_eq!(normalized_name("Jane\t  Smith"), "jane smith");
    }

    #[test]
    fn test_format_name_collapses_whitespace() {
        assert_eq!(format_name("  jane   smith  "), "Jane Smith");
    }

    #[test]
    fn test_format_name_suffixes() {
        assert_eq!(format_name("john doe jr"), "John Doe JR");
        assert_eq!(format_name("henry ford III"), "Henry Ford III");
    }

    #[test]
    fn test_format_name_titles() {
        assert_eq!(format_name("PROF ADA LOVELACE"), "Prof Ada Lovelace");
    }

    #[test]
    fn test_academic_email() {
        assert!(is_academic_email("jane@mit.edu"));
        assert!(is_academic_email("j.smith@cam.ac.uk"));
        assert!(is_academic_email("JANE@ETHZ.CH"));
        assert!(!is_academic_email("jane@gmail.com"));
        assert!(!is_academic_email(""));
    }
}
