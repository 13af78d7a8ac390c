//! Researcher record models: raw source payloads and enriched pipeline output.

use serde::{Deserialize, Serialize};

use crate::text;

/// A researcher profile as delivered by the external profile source.
///
/// Read-only input to the pipeline. Only `name` is required; everything else
/// degrades gracefully when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfileRecord {
    /// Source-assigned scholar identifier. May be empty when the source
    /// could not resolve one.
    #[serde(default)]
    pub scholar_id: String,

    /// Display name. Required non-empty.
    pub name: String,

    /// Free-text affiliation string (e.g. "MIT, Cambridge, United States").
    #[serde(default)]
    pub affiliation: Option<String>,

    /// Contact e-mail, when the profile exposes one.
    #[serde(default)]
    pub email: Option<String>,

    /// Free-text research interest keywords, in profile order.
    #[serde(default)]
    pub interests: Vec<String>,

    /// Total citation count.
    #[serde(default)]
    pub citations: i64,

    /// h-index metric.
    #[serde(default)]
    pub h_index: i64,

    /// i10-index metric.
    #[serde(default)]
    pub i10_index: i64,

    /// Total publication count, when the source reports one.
    #[serde(default)]
    pub paper_count: Option<i64>,

    /// Homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Profile photo URL.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl RawProfileRecord {
    /// Check whether the source assigned a usable scholar identifier.
    #[must_use]
    pub fn has_scholar_id(&self) -> bool {
        !self.scholar_id.trim().is_empty()
    }

    /// Deduplication identity key: scholar id when present, otherwise the
    /// lower-cased, whitespace-trimmed display name.
    #[must_use]
    pub fn identity_key(&self) -> String {
        if self.has_scholar_id() {
            self.scholar_id.trim().to_string()
        } else {
            text::normalized_name(&self.name)
        }
    }
}

/// Coarse geographic bucket derived from a resolved country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    /// United States and Canada.
    #[serde(rename = "North America")]
    NorthAmerica,
    /// Western and Northern Europe.
    Europe,
    /// Greater China (mainland, Hong Kong, Macau, Taiwan).
    China,
    Japan,
    #[serde(rename = "South Korea")]
    SouthKorea,
    Singapore,
    /// Australia and New Zealand.
    Australia,
    India,
    /// Country resolved but outside every named tier.
    Other,
    /// No country could be resolved.
    #[default]
    Unknown,
}

impl Region {
    /// Human-readable region name (matches the serialized form).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::Europe => "Europe",
            Self::China => "China",
            Self::Japan => "Japan",
            Self::SouthKorea => "South Korea",
            Self::Singapore => "Singapore",
            Self::Australia => "Australia",
            Self::India => "India",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A researcher record after one pipeline pass: raw fields plus resolved
/// location, rank score, category membership and the verification heuristic.
///
/// Immutable once produced; a later run supersedes it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedResearcher {
    /// Source-assigned scholar identifier (may be empty).
    #[serde(default)]
    pub scholar_id: String,

    /// Normalized display name.
    pub name: String,

    /// Original affiliation string, unmodified.
    #[serde(default)]
    pub affiliation: Option<String>,

    /// Contact e-mail.
    #[serde(default)]
    pub email: Option<String>,

    /// Institution name extracted from the affiliation.
    #[serde(default)]
    pub institution: Option<String>,

    /// Canonical country name extracted from the affiliation.
    #[serde(default)]
    pub country: Option<String>,

    /// Geographic region derived from the country.
    #[serde(default)]
    pub region: Region,

    /// Total citation count.
    #[serde(default)]
    pub citations: i64,

    /// h-index metric.
    #[serde(default)]
    pub h_index: i64,

    /// i10-index metric.
    #[serde(default)]
    pub i10_index: i64,

    /// Total publication count, when known.
    #[serde(default)]
    pub paper_count: Option<i64>,

    /// Composite 0-100 rank score. Pure function of
    /// (citations, h_index, i10_index).
    #[serde(default)]
    pub rank_score: f64,

    /// Free-text research interests, as received.
    #[serde(default)]
    pub interests: Vec<String>,

    /// Matched taxonomy category keys, in taxonomy order, duplicate-free.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Homepage URL (sanitized; absent when unparsable).
    #[serde(default)]
    pub homepage: Option<String>,

    /// Profile photo URL (sanitized; absent when unparsable).
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Whether the contact e-mail looks academic.
    #[serde(default)]
    pub verified: bool,
}

impl EnrichedResearcher {
    /// Check whether the source assigned a usable scholar identifier.
    #[must_use]
    pub fn has_scholar_id(&self) -> bool {
        !self.scholar_id.trim().is_empty()
    }

    /// Deduplication identity key: scholar id when present, otherwise the
    /// lower-cased, whitespace-trimmed display name.
    #[must_use]
    pub fn identity_key(&self) -> String {
        if self.has_scholar_id() {
            self.scholar_id.trim().to_string()
        } else {
            text::normalized_name(&self.name)
        }
    }

    /// Check whether this researcher matched a given taxonomy category.
    #[must_use]
    pub fn in_category(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c == key)
    }
}
