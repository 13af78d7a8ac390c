//! Configuration: profile-source tuning, pipeline thresholds, and the static
//! taxonomy/geography tables the classifiers run against.
//!
//! Tables are fixed at process start; reloading them is an external concern.

use std::time::Duration;

use crate::models::Region;

/// Profile-source API access constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the academic-profile API.
    pub const BASE_URL: &str = "https://api.scholarprofiles.org/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between candidate-search requests without an API key
    /// (10 requests per minute).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(6);

    /// Delay between candidate-search requests with an API key.
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(500);

    /// Delay between co-publication census requests without an API key.
    /// The census endpoint walks publication listings and is throttled harder.
    pub const CENSUS_RATE_LIMIT_DELAY: Duration = Duration::from_secs(10);

    /// Delay between co-publication census requests with an API key.
    pub const CENSUS_RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_secs(1);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Candidate page size per search request.
    pub const PAGE_SIZE: i64 = 20;
}

/// Pipeline threshold defaults.
pub mod thresholds {
    /// Minimum citations for a candidate to enter a batch.
    pub const MIN_CITATIONS: i64 = 1000;

    /// Maximum candidates collected per search keyword.
    pub const MAX_RESULTS_PER_SEARCH: usize = 100;

    /// Concurrent per-record enrichment tasks.
    pub const ENRICH_CONCURRENCY: usize = 8;

    /// Minimum co-publications before a pair receives an edge.
    pub const MIN_CO_PUBLICATIONS: i64 = 2;
}

/// Research-category taxonomy: category key -> trigger phrases.
///
/// Slice order is the taxonomy insertion order; classifier output preserves
/// it. Phrases are stored lower-case and matched as substrings of the
/// lower-cased interest text.
pub mod taxonomy {
    /// The fixed category table.
    pub const CATEGORIES: &[(&str, &[&str])] = &[
        ("general_robotics", &["robotics", "autonomous systems", "robot control"]),
        ("slam", &["slam", "simultaneous localization and mapping", "visual slam", "lidar slam"]),
        ("robot_vision", &["computer vision", "robot vision", "visual perception", "object detection"]),
        ("aerial_robotics", &["unmanned aerial vehicles", "drone", "quadcopter", "uav", "aerial robotics"]),
        ("marine_robotics", &["underwater robotics", "marine robotics", "auv", "autonomous underwater vehicle"]),
        ("space_robotics", &["space robotics", "planetary rovers", "satellite robotics"]),
        ("field_robotics", &["field robotics", "outdoor robotics", "agricultural robotics"]),
        ("path_planning", &["path planning", "motion planning", "trajectory planning", "navigation"]),
        ("human_robot_interaction", &["human robot interaction", "hri", "social robotics"]),
        ("swarm_robotics", &["swarm robotics", "multi-robot systems", "collective intelligence"]),
        ("medical_robotics", &["medical robotics", "surgical robotics", "rehabilitation robotics"]),
        ("manipulation", &["robot manipulation", "grasping", "dexterous manipulation"]),
    ];

    /// Look up the trigger phrases for a category key.
    #[must_use]
    pub fn phrases_for(key: &str) -> Option<&'static [&'static str]> {
        CATEGORIES.iter().find(|(k, _)| *k == key).map(|(_, phrases)| *phrases)
    }

    /// Check whether a category key exists in the taxonomy.
    #[must_use]
    pub fn is_known_category(key: &str) -> bool {
        CATEGORIES.iter().any(|(k, _)| *k == key)
    }
}

/// Geography tables: region tiers, country names, aliases, and the ordered
/// country-pattern list.
pub mod geo {
    use crate::models::Region;

    /// North America tier.
    pub const NORTH_AMERICA: &[&str] = &["United States", "Canada"];

    /// Europe tier.
    pub const EUROPE: &[&str] = &[
        "United Kingdom",
        "Germany",
        "France",
        "Netherlands",
        "Switzerland",
        "Italy",
        "Spain",
        "Sweden",
        "Denmark",
        "Norway",
        "Finland",
        "Austria",
        "Belgium",
    ];

    /// Asia-Pacific sub-regions, each a named region covering a small set of
    /// country aliases.
    pub const ASIA_PACIFIC: &[(Region, &[&str])] = &[
        (Region::China, &["China", "Hong Kong", "Macau", "Taiwan"]),
        (Region::Japan, &["Japan"]),
        (Region::SouthKorea, &["South Korea"]),
        (Region::Singapore, &["Singapore"]),
        (Region::Australia, &["Australia", "New Zealand"]),
        (Region::India, &["India"]),
    ];

    /// Curated set of common country names, checked first.
    pub const COMMON_COUNTRIES: &[&str] = &[
        "United States",
        "United Kingdom",
        "Germany",
        "France",
        "Italy",
        "Spain",
        "China",
        "Japan",
        "South Korea",
        "India",
        "Canada",
        "Australia",
        "Netherlands",
        "Switzerland",
        "Sweden",
        "Norway",
        "Denmark",
        "Finland",
        "Singapore",
        "Taiwan",
        "Hong Kong",
        "New Zealand",
        "Austria",
        "Belgium",
    ];

    /// Extended country-name table, the static stand-in for an external
    /// country-code lookup. Checked after the curated set.
    pub const EXTENDED_COUNTRIES: &[&str] = &[
        "Afghanistan", "Albania", "Algeria", "Argentina", "Armenia", "Azerbaijan",
        "Bahrain", "Bangladesh", "Belarus", "Bolivia", "Bosnia and Herzegovina",
        "Botswana", "Brazil", "Brunei", "Bulgaria", "Cambodia", "Cameroon", "Chile",
        "Colombia", "Costa Rica", "Croatia", "Cuba", "Cyprus", "Czechia",
        "Czech Republic", "Ecuador", "Egypt", "El Salvador", "Estonia", "Ethiopia",
        "Georgia", "Ghana", "Greece", "Guatemala", "Honduras", "Hungary", "Iceland",
        "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Jamaica", "Jordan",
        "Kazakhstan", "Kenya", "Kuwait", "Kyrgyzstan", "Laos", "Latvia", "Lebanon",
        "Libya", "Liechtenstein", "Lithuania", "Luxembourg", "Macau", "Malaysia",
        "Malta", "Mexico", "Moldova", "Monaco", "Mongolia", "Montenegro", "Morocco",
        "Myanmar", "Nepal", "Nicaragua", "Nigeria", "North Macedonia", "Oman",
        "Pakistan", "Panama", "Paraguay", "Peru", "Philippines", "Poland",
        "Portugal", "Qatar", "Romania", "Russia", "Rwanda", "Saudi Arabia",
        "Senegal", "Serbia", "Slovakia", "Slovenia", "South Africa", "Sri Lanka",
        "Sudan", "Syria", "Tanzania", "Thailand", "Tunisia", "Turkey",
        "Turkmenistan", "Uganda", "Ukraine", "United Arab Emirates", "Uruguay",
        "Uzbekistan", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
    ];

    /// Alias -> canonical country name.
    pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
        ("USA", "United States"),
        ("US", "United States"),
        ("UK", "United Kingdom"),
        ("Britain", "United Kingdom"),
        ("PRC", "China"),
        ("ROC", "Taiwan"),
        ("HK", "Hong Kong"),
        ("NZ", "New Zealand"),
        ("Korea", "South Korea"),
        ("Deutschland", "Germany"),
        ("Francia", "France"),
        ("Italia", "Italy"),
        ("España", "Spain"),
        ("Holland", "Netherlands"),
        ("Schweiz", "Switzerland"),
        ("Sverige", "Sweden"),
        ("Norge", "Norway"),
        ("Danmark", "Denmark"),
        ("Suomi", "Finland"),
        ("日本", "Japan"),
        ("भारत", "India"),
    ];

    /// Ordered (pattern, canonical country) pairs for single-part affiliation
    /// strings. Evaluated top to bottom; the first match wins, so the order
    /// here is a behavioral invariant.
    pub const COUNTRY_PATTERNS: &[(&str, &str)] = &[
        (r"\b(?:USA|United States|US)\b", "United States"),
        (r"\b(?:UK|United Kingdom|Britain)\b", "United Kingdom"),
        (r"\b(?:Germany|Deutschland)\b", "Germany"),
        (r"\b(?:China|PRC)\b", "China"),
        (r"\b(?:Japan|日本)\b", "Japan"),
        (r"\b(?:India|भारत)\b", "India"),
        (r"\bCanada\b", "Canada"),
        (r"\bAustralia\b", "Australia"),
        (r"\bSingapore\b", "Singapore"),
        (r"\b(?:South Korea|Korea)\b", "South Korea"),
        (r"\b(?:France|Francia)\b", "France"),
        (r"\b(?:Italy|Italia)\b", "Italy"),
        (r"\b(?:Spain|España)\b", "Spain"),
        (r"\b(?:Netherlands|Holland)\b", "Netherlands"),
        (r"\b(?:Switzerland|Schweiz)\b", "Switzerland"),
        (r"\b(?:Sweden|Sverige)\b", "Sweden"),
        (r"\b(?:Norway|Norge)\b", "Norway"),
        (r"\b(?:Denmark|Danmark)\b", "Denmark"),
        (r"\b(?:Finland|Suomi)\b", "Finland"),
        (r"\b(?:Taiwan|ROC)\b", "Taiwan"),
        (r"\b(?:Hong Kong|HK)\b", "Hong Kong"),
        (r"\b(?:New Zealand|NZ)\b", "New Zealand"),
    ];
}

/// Profile-source runtime configuration.
///
/// Rate limiting lives here, injected into the source client, never held as
/// ambient global state.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Profile-source API key (optional; raises rate limits).
    pub api_key: Option<String>,

    /// Base URL (overridable for mock servers in tests).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay between candidate-search requests.
    pub rate_limit_delay: Duration,

    /// Delay between co-publication census requests.
    pub census_rate_limit_delay: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl SourceConfig {
    /// Create a source configuration with optional API key.
    ///
    /// Rate limits are adjusted automatically based on key presence:
    /// - Without key: 10 searches/min, 6 census calls/min
    /// - With key: 2 searches/s, 1 census call/s
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            census_rate_limit_delay: if has_key {
                api::CENSUS_RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::CENSUS_RATE_LIMIT_DELAY
            },
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Pipeline configuration: admission thresholds, concurrency, and source
/// tuning.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum citations for a candidate to enter a batch.
    pub min_citations: i64,

    /// Maximum candidates collected per search keyword.
    pub max_results_per_search: usize,

    /// Concurrent per-record enrichment tasks.
    pub enrich_concurrency: usize,

    /// Minimum co-publications before a pair receives an edge.
    pub min_co_publications: i64,

    /// Profile-source configuration.
    pub source: SourceConfig,
}

impl Config {
    /// Create a configuration with optional source API key and default
    /// thresholds.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            min_citations: thresholds::MIN_CITATIONS,
            max_results_per_search: thresholds::MAX_RESULTS_PER_SEARCH,
            enrich_concurrency: thresholds::ENRICH_CONCURRENCY,
            min_co_publications: thresholds::MIN_CO_PUBLICATIONS,
            source: SourceConfig::new(api_key),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SCHOLAR_PROFILE_API_KEY").ok();
        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("SCHOLAR_PROFILE_BASE_URL") {
            config.source.base_url = url;
        }
        Ok(config)
    }

    /// Create a test configuration with a custom URL for mock servers and no
    /// thresholds, delays, or caching in the way.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            min_citations: 0,
            max_results_per_search: thresholds::MAX_RESULTS_PER_SEARCH,
            enrich_concurrency: 2,
            min_co_publications: 1,
            source: SourceConfig {
                api_key: None,
                base_url: base_url.to_string(),
                request_timeout: Duration::from_secs(5),
                connect_timeout: Duration::from_secs(2),
                rate_limit_delay: Duration::from_millis(0),
                census_rate_limit_delay: Duration::from_millis(0),
                cache_ttl: Duration::from_secs(0),
                cache_max_size: 0,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

/// All regions covered by the tier tables, in tier order.
#[must_use]
pub fn named_regions() -> Vec<Region> {
    let mut regions = vec![Region::NorthAmerica, Region::Europe];
    regions.extend(geo::ASIA_PACIFIC.iter().map(|(region, _)| *region));
    regions
}
