//! Collaboration graph models: edges, pairwise co-publication counts, and
//! the per-run graph output.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EnrichedResearcher, Region};

/// Direction of a collaboration edge, read as "source relates to target".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Source is the senior party (rank dominance over 1.5x).
    MentorToStudent,
    /// Target is the senior party.
    StudentToMentor,
    /// Comparable rank; ties and near-ties land here.
    #[default]
    Peer,
}

impl Direction {
    /// Serialized edge label (matches the wire form).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MentorToStudent => "mentor_to_student",
            Self::StudentToMentor => "student_to_mentor",
            Self::Peer => "peer",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, weighted co-authorship edge between two researchers.
///
/// Edges are regenerated wholesale on every pipeline run, never updated in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationEdge {
    /// Identity key of the source researcher.
    pub source: String,

    /// Identity key of the target researcher.
    pub target: String,

    /// Relationship direction, "source relates to target".
    pub direction: Direction,

    /// Collaboration strength in [0, 1].
    pub strength: f64,

    /// Number of shared publications behind this edge.
    pub co_publications: i64,
}

/// Pairwise co-publication counts keyed by unordered researcher pairs.
///
/// Keys are identity keys. The pair ordering is normalized internally, so
/// `record(a, b, n)` and `record(b, a, n)` address the same entry; repeated
/// records keep the larger count, which makes a symmetric census idempotent.
#[derive(Debug, Clone, Default)]
pub struct CoPublicationCounts {
    counts: HashMap<(String, String), i64>,
}

/// Serialized form of one pairwise count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoPublicationEntry {
    /// Identity key of one endpoint.
    pub source: String,
    /// Identity key of the other endpoint.
    pub target: String,
    /// Shared publication count.
    pub count: i64,
}

impl CoPublicationCounts {
    /// Create an empty count table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn pair_key(a: &str, b: &str) -> (String, String) {
        let a = a.trim();
        let b = b.trim();
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Record a co-publication count for a pair. Keeps the larger count on
    /// repeated records of the same pair.
    pub fn record(&mut self, a: &str, b: &str, count: i64) {
        if a.trim().is_empty() || b.trim().is_empty() || a.trim() == b.trim() {
            return;
        }
        self.counts
            .entry(Self::pair_key(a, b))
            .and_modify(|existing| *existing = (*existing).max(count))
            .or_insert(count);
    }

    /// Look up the count for a pair (0 when unrecorded).
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> i64 {
        self.counts.get(&Self::pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Iterate recorded pairs in normalized key order (deterministic).
    pub fn sorted_pairs(&self) -> Vec<(&str, &str, i64)> {
        let mut pairs: Vec<_> = self
            .counts
            .iter()
            .map(|((a, b), count)| (a.as_str(), b.as_str(), *count))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether no pairs are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Build from serialized entries.
    #[must_use]
    pub fn from_entries(entries: Vec<CoPublicationEntry>) -> Self {
        let mut counts = Self::new();
        for entry in entries {
            counts.record(&entry.source, &entry.target, entry.count);
        }
        counts
    }

    /// Convert to serialized entries in deterministic order.
    #[must_use]
    pub fn to_entries(&self) -> Vec<CoPublicationEntry> {
        self.sorted_pairs()
            .into_iter()
            .map(|(a, b, count)| CoPublicationEntry {
                source: a.to_string(),
                target: b.to_string(),
                count,
            })
            .collect()
    }
}

/// Post-processing filter applied to a built graph.
///
/// Mirrors the query surface the original graph endpoints exposed; `None`
/// fields pass everything through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFilter {
    /// Keep only researchers in these regions.
    #[serde(default)]
    pub regions: Option<Vec<Region>>,

    /// Keep only researchers matching at least one of these category keys.
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Keep only researchers with at least this many citations.
    #[serde(default)]
    pub min_citations: Option<i64>,

    /// Drop edges weaker than this strength.
    #[serde(default)]
    pub min_strength: Option<f64>,

    /// Keep only the top N researchers by rank score.
    #[serde(default)]
    pub max_nodes: Option<usize>,

    /// Whether to keep edges at all.
    #[serde(default = "default_true")]
    pub include_edges: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GraphFilter {
    fn default() -> Self {
        Self {
            regions: None,
            categories: None,
            min_citations: None,
            min_strength: None,
            max_nodes: None,
            include_edges: true,
        }
    }
}

impl GraphFilter {
    fn matches(&self, researcher: &EnrichedResearcher) -> bool {
        if let Some(min) = self.min_citations {
            if researcher.citations < min {
                return false;
            }
        }
        if let Some(ref regions) = self.regions {
            if !regions.contains(&researcher.region) {
                return false;
            }
        }
        if let Some(ref categories) = self.categories {
            if !categories.iter().any(|c| researcher.in_category(c)) {
                return false;
            }
        }
        true
    }
}

/// Metadata attached to a graph run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    /// Number of nodes in the graph.
    pub total_nodes: usize,

    /// Number of edges in the graph.
    pub total_edges: usize,

    /// UTC timestamp of graph generation.
    pub generated_at: DateTime<Utc>,

    /// Filter applied to produce this graph, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<GraphFilter>,
}

/// Output of one pipeline run: deduplicated researcher nodes plus inferred
/// collaboration edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResult {
    /// Deduplicated, enriched researchers.
    pub nodes: Vec<EnrichedResearcher>,

    /// Inferred collaboration edges.
    pub edges: Vec<CollaborationEdge>,

    /// Run metadata.
    pub meta: GraphMeta,
}

impl GraphResult {
    /// Assemble a result, stamping node/edge totals and generation time.
    #[must_use]
    pub fn new(nodes: Vec<EnrichedResearcher>, edges: Vec<CollaborationEdge>) -> Self {
        let meta = GraphMeta {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            generated_at: Utc::now(),
            filter: None,
        };
        Self { nodes, edges, meta }
    }

    /// Check whether the graph has neither nodes nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Apply a filter, producing a pruned copy.
    ///
    /// Node predicates run first; `max_nodes` then keeps the top N by rank
    /// score. Edges survive only when both endpoints survive and the edge
    /// meets the strength floor.
    #[must_use]
    pub fn filtered(&self, filter: &GraphFilter) -> Self {
        let mut nodes: Vec<EnrichedResearcher> =
            self.nodes.iter().filter(|n| filter.matches(n)).cloned().collect();

        if let Some(max) = filter.max_nodes {
            nodes.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
            nodes.truncate(max);
        }

        let surviving: HashSet<String> = nodes.iter().map(EnrichedResearcher::identity_key).collect();

        let edges: Vec<CollaborationEdge> = if filter.include_edges {
            let floor = filter.min_strength.unwrap_or(0.0);
            self.edges
                .iter()
                .filter(|e| {
                    e.strength >= floor
                        && surviving.contains(&e.source)
                        && surviving.contains(&e.target)
                })
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let meta = GraphMeta {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            generated_at: self.meta.generated_at,
            filter: Some(filter.clone()),
        };
        Self { nodes, edges, meta }
    }
}
