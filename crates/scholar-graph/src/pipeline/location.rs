//! Affiliation parsing: institution/country extraction and region derivation.
//!
//! Best-effort heuristics over free-text affiliation strings. Malformed
//! input degrades to `None`, it never errors.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::config::geo;
use crate::models::Region;

/// Institutional words stripped before a part is tested as a country name.
static INSTITUTIONAL_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\b(?:University|Institute|College|School|Department|Dept)\b")
        .case_insensitive(true)
        .build()
        .expect("valid institutional-words pattern")
});

/// Connector words stripped before a part is tested as a country name.
static CONNECTOR_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\b(?:of|the|and|&)\b")
        .case_insensitive(true)
        .build()
        .expect("valid connector-words pattern")
});

/// Punctuation stripped before a part is tested as a country name.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));

/// Compiled country patterns in declared priority order. The first matching
/// pattern wins, so this order is a behavioral invariant (tested).
static COUNTRY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    geo::COUNTRY_PATTERNS
        .iter()
        .map(|(pattern, canonical)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("valid country pattern");
            (regex, *canonical)
        })
        .collect()
});

/// Parse a free-text affiliation into (institution, country).
///
/// With two or more comma-separated parts the first part is the institution
/// candidate (trimmed, verbatim) and the last three parts are scanned in
/// reverse for a known country name. With a single part the whole string is
/// the institution and the ordered country-pattern list is scanned instead.
#[must_use]
pub fn resolve(affiliation: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(raw) = affiliation else {
        return (None, None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return (None, None);
    }

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    let institution = parts.first().filter(|p| !p.is_empty()).map(|p| (*p).to_string());

    let country = if parts.len() >= 2 {
        let tail_start = parts.len().saturating_sub(3);
        parts[tail_start..]
            .iter()
            .rev()
            .find_map(|part| known_country(&clean_country_name(part)))
            .map(String::from)
    } else {
        scan_country_patterns(raw).map(String::from)
    };

    (institution, country)
}

/// Strip institutional words, connector words and punctuation from a
/// candidate country part, collapsing leftover whitespace.
#[must_use]
pub fn clean_country_name(name: &str) -> String {
    let stripped = INSTITUTIONAL_WORDS.replace_all(name, "");
    let stripped = CONNECTOR_WORDS.replace_all(&stripped, "");
    let stripped = PUNCTUATION.replace_all(&stripped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Test a cleaned string against the known-country set: the curated common
/// table first, the extended table second, the alias table last. Returns the
/// canonical country name.
#[must_use]
pub fn known_country(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.len() < 2 {
        return None;
    }

    geo::COMMON_COUNTRIES
        .iter()
        .chain(geo::EXTENDED_COUNTRIES)
        .find(|country| country.eq_ignore_ascii_case(name))
        .copied()
        .or_else(|| {
            geo::COUNTRY_ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
                .map(|(_, canonical)| *canonical)
        })
}

/// Scan free text against the ordered country-pattern list; the first match
/// in priority order wins.
#[must_use]
pub fn scan_country_patterns(text: &str) -> Option<&'static str> {
    COUNTRY_PATTERNS.iter().find(|(regex, _)| regex.is_match(text)).map(|(_, canonical)| *canonical)
}

/// Derive the geographic region for a resolved country.
///
/// Exact tier lookup: North America, then Europe, then the Asia-Pacific
/// sub-regions. A country outside every tier maps to `Other`; no country at
/// all maps to `Unknown`.
#[must_use]
pub fn region_of(country: Option<&str>) -> Region {
    let Some(country) = country else {
        return Region::Unknown;
    };
    let country = country.trim();
    if country.is_empty() {
        return Region::Unknown;
    }

    if geo::NORTH_AMERICA.iter().any(|c| c.eq_ignore_ascii_case(country)) {
        return Region::NorthAmerica;
    }
    if geo::EUROPE.iter().any(|c| c.eq_ignore_ascii_case(country)) {
        return Region::Europe;
    }
    for (region, countries) in geo::ASIA_PACIFIC {
        if countries.iter().any(|c| c.eq_ignore_ascii_case(country)) {
            return *region;
        }
    }

    Region::Other
}
