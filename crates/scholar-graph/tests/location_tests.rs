//! Affiliation-resolution tests through the public location API.

use scholar_graph::models::Region;
use scholar_graph::pipeline::location::{
    clean_country_name, known_country, region_of, resolve, scan_country_patterns,
};

// =============================================================================
// resolve: comma-split path
// =============================================================================

#[test]
fn test_mit_cambridge_united_states() {
    let (institution, country) = resolve(Some("MIT, Cambridge, United States"));
    assert!(institution.unwrap().contains("MIT"));
    assert_eq!(country.as_deref(), Some("United States"));
    assert_eq!(region_of(country.as_deref()), Region::NorthAmerica);
}

#[test]
fn test_country_found_behind_institutional_words() {
    let (_, country) = resolve(Some("Robotics Lab, University of Tokyo, Japan"));
    assert_eq!(country.as_deref(), Some("Japan"));

    // The tail part itself needs cleaning before it matches.
    let (_, country) = resolve(Some("Robotics Lab, The University of Singapore"));
    assert_eq!(country.as_deref(), Some("Singapore"));
}

#[test]
fn test_only_last_three_parts_are_scanned() {
    let (_, country) =
        resolve(Some("Germany Institute, Alpha, Beta, Gamma, Delta"));
    // "Germany" sits outside the three-part tail window.
    assert!(country.is_none());
}

#[test]
fn test_extended_table_countries_resolve() {
    let (_, country) = resolve(Some("Universidade de Sao Paulo, Brazil"));
    assert_eq!(country.as_deref(), Some("Brazil"));
    assert_eq!(region_of(country.as_deref()), Region::Other);
}

#[test]
fn test_alias_in_tail_is_canonicalized() {
    let (_, country) = resolve(Some("KAIST, Daejeon, Korea"));
    assert_eq!(country.as_deref(), Some("South Korea"));
    assert_eq!(region_of(country.as_deref()), Region::SouthKorea);
}

// =============================================================================
// resolve: single-part pattern path
// =============================================================================

#[test]
fn test_stanford_university_has_no_country() {
    let (institution, country) = resolve(Some("Stanford University"));
    assert_eq!(institution.as_deref(), Some("Stanford University"));
    assert!(country.is_none());
    assert_eq!(region_of(country.as_deref()), Region::Unknown);
}

#[test]
fn test_single_part_pattern_hits() {
    let cases = [
        ("Oxford Robotics Institute UK", "United Kingdom"),
        ("TU Muenchen Deutschland", "Germany"),
        ("HKUST Hong Kong", "Hong Kong"),
        ("Auckland Bioengineering NZ", "New Zealand"),
        ("IIT Delhi India", "India"),
    ];
    for (input, expected) in cases {
        let (_, country) = resolve(Some(input));
        assert_eq!(country.as_deref(), Some(expected), "input: {input}");
    }
}

#[test]
fn test_pattern_priority_is_declared_order() {
    // United States is declared first; a string matching several patterns
    // resolves to the earliest declared one.
    assert_eq!(scan_country_patterns("US-UK-China joint program"), Some("United States"));
    assert_eq!(scan_country_patterns("UK-China joint program"), Some("United Kingdom"));
    assert_eq!(scan_country_patterns("China joint program"), Some("China"));
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn test_clean_country_name() {
    assert_eq!(clean_country_name("University of Canada"), "Canada");
    assert_eq!(clean_country_name("School of the Netherlands."), "Netherlands");
    assert_eq!(clean_country_name("Dept, of, and"), "");
}

#[test]
fn test_known_country_rejects_short_and_unknown() {
    assert_eq!(known_country(""), None);
    assert_eq!(known_country("A"), None);
    assert_eq!(known_country("Narnia"), None);
    assert_eq!(known_country("switzerland"), Some("Switzerland"));
    assert_eq!(known_country("HK"), Some("Hong Kong"));
}

#[test]
fn test_region_tiers_cover_all_buckets() {
    assert_eq!(region_of(Some("Canada")), Region::NorthAmerica);
    assert_eq!(region_of(Some("Belgium")), Region::Europe);
    assert_eq!(region_of(Some("Macau")), Region::China);
    assert_eq!(region_of(Some("Japan")), Region::Japan);
    assert_eq!(region_of(Some("South Korea")), Region::SouthKorea);
    assert_eq!(region_of(Some("Singapore")), Region::Singapore);
    assert_eq!(region_of(Some("New Zealand")), Region::Australia);
    assert_eq!(region_of(Some("India")), Region::India);
    assert_eq!(region_of(Some("Chile")), Region::Other);
    assert_eq!(region_of(None), Region::Unknown);
}
