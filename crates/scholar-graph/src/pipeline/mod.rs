//! The ingestion pipeline: per-record enrichment, batch deduplication, and
//! collaboration-graph derivation.
//!
//! The algorithmic components (location, category, rank, dedup, collab) are
//! synchronous and pure; the orchestrator here fans enrichment out across
//! bounded concurrent tasks and sequences the batch phases.

pub mod category;
pub mod collab;
pub mod dedup;
pub mod location;
pub mod rank;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, SourceError};
use crate::models::{
    CoPublicationCounts, CollaborationEdge, EnrichedResearcher, GraphFilter, GraphResult,
    RawProfileRecord,
};
use crate::source::ProfileSource;
use crate::text;

/// Phases of one batch run, in order. Surfaced through tracing so progress
/// is observable from the outside; no phase is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    /// Pulling candidate records from the profile source.
    Collecting,
    /// Per-record enrichment (location, categories, rank).
    Enriching,
    /// Batch-wide identity collapse.
    Deduplicating,
    /// Pairwise edge inference.
    GraphBuilding,
    /// Run finished.
    Done,
}

impl BatchPhase {
    /// Log-friendly phase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Enriching => "enriching",
            Self::Deduplicating => "deduplicating",
            Self::GraphBuilding => "graph_building",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cooperative cancellation flag for a batch run.
///
/// Cancelling stops further fetches toward the profile source; records
/// already collected are still enriched and returned, since partial results
/// are valid output.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a fresh, uncancelled flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

/// Orchestrator for batch ingestion runs.
///
/// Owns every derived entity for the duration of a run; nothing outlives the
/// returned [`GraphResult`].
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    config: Config,
}

impl IngestionPipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enrich a single raw record. Never fails: malformed affiliation or
    /// interest text degrades to `None`/`Unknown`/empty fields, invalid
    /// citation metrics degrade to a zero rank score.
    #[must_use]
    pub fn enrich(&self, record: RawProfileRecord) -> EnrichedResearcher {
        self.enrich_with_keywords(record, &[])
    }

    /// Enrich with the search keywords that surfaced the record, so they
    /// participate in category classification alongside profile interests.
    pub(crate) fn enrich_with_keywords(
        &self,
        record: RawProfileRecord,
        search_keywords: &[String],
    ) -> EnrichedResearcher {
        let (institution, country) = location::resolve(record.affiliation.as_deref());
        let region = location::region_of(country.as_deref());

        let categories = category::classify(&record.interests, search_keywords)
            .into_iter()
            .map(String::from)
            .collect();

        let rank_score =
            match rank::validate_metrics(record.citations, record.h_index, record.i10_index) {
                Ok(()) => rank::score(record.citations, record.h_index, record.i10_index),
                Err(err) => {
                    tracing::warn!(
                        researcher = %record.name,
                        error = %err,
                        "invalid citation metrics, rank score degrades to 0"
                    );
                    0.0
                }
            };

        let verified = record.email.as_deref().is_some_and(text::is_academic_email);

        EnrichedResearcher {
            scholar_id: record.scholar_id.trim().to_string(),
            name: text::format_name(&record.name),
            affiliation: record.affiliation,
            email: record.email,
            institution,
            country,
            region,
            citations: record.citations,
            h_index: record.h_index,
            i10_index: record.i10_index,
            paper_count: record.paper_count,
            rank_score,
            interests: record.interests,
            categories,
            homepage: sanitize_url(record.homepage),
            photo_url: sanitize_url(record.photo_url),
            verified,
        }
    }

    /// Run a full batch over pre-collected records: concurrent enrichment,
    /// deduplication, and edge inference over the supplied pairwise
    /// co-publication counts.
    ///
    /// # Errors
    ///
    /// Only on invalid arguments (negative co-publication counts); individual
    /// unparsable records never fail the batch.
    pub async fn run_batch(
        &self,
        records: Vec<RawProfileRecord>,
        co_publications: &CoPublicationCounts,
    ) -> PipelineResult<GraphResult> {
        let tagged: Vec<(RawProfileRecord, Vec<String>)> =
            records.into_iter().map(|record| (record, Vec::new())).collect();
        self.run_batch_inner(tagged, co_publications, None).await
    }

    /// [`run_batch`](Self::run_batch) plus a graph filter applied to the
    /// assembled result.
    pub async fn run_batch_filtered(
        &self,
        records: Vec<RawProfileRecord>,
        co_publications: &CoPublicationCounts,
        filter: &GraphFilter,
    ) -> PipelineResult<GraphResult> {
        let tagged: Vec<(RawProfileRecord, Vec<String>)> =
            records.into_iter().map(|record| (record, Vec::new())).collect();
        self.run_batch_inner(tagged, co_publications, Some(filter)).await
    }

    async fn run_batch_inner(
        &self,
        records: Vec<(RawProfileRecord, Vec<String>)>,
        co_publications: &CoPublicationCounts,
        filter: Option<&GraphFilter>,
    ) -> PipelineResult<GraphResult> {
        for (a, b, count) in co_publications.sorted_pairs() {
            if count < 0 {
                return Err(PipelineError::validation(
                    "coPublications",
                    format!("count for pair ({a}, {b}) must be non-negative, got {count}"),
                ));
            }
        }

        tracing::info!(phase = %BatchPhase::Enriching, records = records.len(), "enriching batch");
        // Ordered fan-out: `buffered` (not `buffer_unordered`) so the
        // deduplicator's first-occurrence-wins rule sees input order.
        let enriched: Vec<EnrichedResearcher> = futures::stream::iter(
            records.into_iter().map(|(record, keywords)| async move {
                self.enrich_with_keywords(record, &keywords)
            }),
        )
        .buffered(self.config.enrich_concurrency.max(1))
        .collect()
        .await;

        tracing::info!(phase = %BatchPhase::Deduplicating, records = enriched.len(), "deduplicating");
        let nodes = dedup::deduplicate(enriched);

        tracing::info!(
            phase = %BatchPhase::GraphBuilding,
            nodes = nodes.len(),
            pairs = co_publications.len(),
            "inferring collaboration edges"
        );
        let edges = self.build_edges(&nodes, co_publications);

        let mut graph = GraphResult::new(nodes, edges);
        if let Some(filter) = filter {
            graph = graph.filtered(filter);
        }

        tracing::info!(
            phase = %BatchPhase::Done,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "batch run complete"
        );
        Ok(graph)
    }

    /// Infer edges for every recorded pair whose endpoints survived
    /// deduplication and whose count clears the admission floor. Pairs are
    /// walked in normalized key order so repeated runs serialize identically.
    fn build_edges(
        &self,
        nodes: &[EnrichedResearcher],
        co_publications: &CoPublicationCounts,
    ) -> Vec<CollaborationEdge> {
        let by_key: HashMap<String, &EnrichedResearcher> =
            nodes.iter().map(|node| (node.identity_key(), node)).collect();

        let mut edges = Vec::new();
        for (a_key, b_key, count) in co_publications.sorted_pairs() {
            if count < self.config.min_co_publications {
                continue;
            }
            let (Some(a), Some(b)) = (by_key.get(a_key), by_key.get(b_key)) else {
                continue;
            };
            edges.push(collab::infer(
                a,
                b,
                count,
                a.paper_count.unwrap_or(0),
                b.paper_count.unwrap_or(0),
            ));
        }
        edges
    }

    /// Drive the external profile source end to end: collect candidates per
    /// keyword (admission-thresholded), census co-publications among the
    /// collected batch, then run the batch.
    ///
    /// Cancellation stops further fetches; whatever was already collected is
    /// still enriched and returned.
    ///
    /// # Errors
    ///
    /// Fails with the last source error only when nothing at all could be
    /// collected; per-keyword and per-researcher fetch failures otherwise
    /// degrade to partial results.
    pub async fn run_search(
        &self,
        source: &dyn ProfileSource,
        keywords: &[String],
        cancel: &CancelFlag,
    ) -> PipelineResult<GraphResult> {
        tracing::info!(phase = %BatchPhase::Collecting, keywords = keywords.len(), "collecting candidates");

        let mut collected: Vec<(RawProfileRecord, Vec<String>)> = Vec::new();
        let mut last_error: Option<SourceError> = None;

        for keyword in keywords {
            if cancel.is_cancelled() {
                tracing::info!("cancelled, stopping candidate fetches");
                break;
            }

            let mut candidates = source.fetch_candidates(keyword);
            let mut kept = 0usize;

            loop {
                if cancel.is_cancelled() {
                    break;
                }
                match candidates.next().await {
                    Some(Ok(record)) => {
                        if record.citations < self.config.min_citations {
                            tracing::debug!(
                                researcher = %record.name,
                                citations = record.citations,
                                "below admission threshold, skipping"
                            );
                            continue;
                        }
                        collected.push((record, vec![keyword.clone()]));
                        kept += 1;
                        if kept >= self.config.max_results_per_search {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        tracing::warn!(keyword = %keyword, error = %err, "candidate fetch failed");
                        last_error = Some(err);
                        break;
                    }
                    None => break,
                }
            }
        }

        if collected.is_empty() {
            if let Some(err) = last_error {
                return Err(err.into());
            }
            tracing::info!("no candidates collected, returning empty graph");
        }

        let co_publications = self.census_co_publications(source, &collected, cancel).await;
        self.run_batch_inner(collected, &co_publications, None).await
    }

    /// Count shared publications between collected researchers by querying
    /// the source per researcher and matching reported co-author names back
    /// into the batch by normalized name.
    async fn census_co_publications(
        &self,
        source: &dyn ProfileSource,
        collected: &[(RawProfileRecord, Vec<String>)],
        cancel: &CancelFlag,
    ) -> CoPublicationCounts {
        let by_name: HashMap<String, String> = collected
            .iter()
            .map(|(record, _)| (text::normalized_name(&record.name), record.identity_key()))
            .collect();

        let mut counts = CoPublicationCounts::new();
        let mut queried: HashSet<String> = HashSet::new();

        for (record, _) in collected {
            if cancel.is_cancelled() {
                tracing::info!("cancelled, stopping co-publication census");
                break;
            }
            if !record.has_scholar_id() || !queried.insert(record.identity_key()) {
                continue;
            }

            match source.fetch_co_publications(record.scholar_id.trim()).await {
                Ok(census) => {
                    for (other_name, count) in census {
                        if let Some(other_key) = by_name.get(&text::normalized_name(&other_name)) {
                            counts.record(&record.identity_key(), other_key, count);
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        researcher = %record.name,
                        error = %err,
                        "co-publication census failed, continuing without this researcher"
                    );
                }
            }
        }

        counts
    }
}

fn sanitize_url(candidate: Option<String>) -> Option<String> {
    let candidate = candidate?;
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }
    url::Url::parse(trimmed).ok().map(|parsed| parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn pipeline() -> IngestionPipeline {
        IngestionPipeline::new(Config::default())
    }

    fn raw(name: &str, affiliation: Option<&str>) -> RawProfileRecord {
        RawProfileRecord {
            scholar_id: String::new(),
            name: name.to_string(),
            affiliation: affiliation.map(ToString::to_string),
            citations: 2000,
            h_index: 30,
            i10_index: 80,
            ..Default::default()
        }
    }

    #[test]
    fn test_enrich_resolves_location_and_region() {
        let enriched =
            pipeline().enrich(raw("Jane Smith", Some("MIT, Cambridge, United States")));
        assert!(enriched.institution.unwrap().contains("MIT"));
        assert_eq!(enriched.country.as_deref(), Some("United States"));
        assert_eq!(enriched.region, Region::NorthAmerica);
        assert!(enriched.rank_score > 0.0);
    }

    #[test]
    fn test_enrich_degrades_on_missing_affiliation() {
        let enriched = pipeline().enrich(raw("Jane Smith", None));
        assert!(enriched.institution.is_none());
        assert!(enriched.country.is_none());
        assert_eq!(enriched.region, Region::Unknown);
    }

    #[test]
    fn test_enrich_never_fails_on_invalid_metrics() {
        let mut record = raw("Broken Metrics", None);
        record.citations = -10;
        let enriched = pipeline().enrich(record);
        assert_eq!(enriched.rank_score, 0.0);
        assert_eq!(enriched.citations, -10);
    }

    #[test]
    fn test_enrich_classifies_interests() {
        let mut record = raw("Jane Smith", None);
        record.interests = vec!["visual slam".to_string(), "lidar".to_string()];
        let enriched = pipeline().enrich(record);
        assert!(enriched.in_category("slam"));
    }

    #[test]
    fn test_enrich_formats_name_and_flags_academic_email() {
        let mut record = raw("  jane   SMITH ", None);
        record.email = Some("jane@mit.edu".to_string());
        let enriched = pipeline().enrich(record);
        assert_eq!(enriched.name, "Jane Smith");
        assert!(enriched.verified);
    }

    #[test]
    fn test_enrich_sanitizes_urls() {
        let mut record = raw("Jane Smith", None);
        record.homepage = Some("https://example.edu/~jane".to_string());
        record.photo_url = Some("not a url".to_string());
        let enriched = pipeline().enrich(record);
        assert!(enriched.homepage.is_some());
        assert!(enriched.photo_url.is_none());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        let clone = flag.clone();
        clone.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_batch_phase_labels() {
        assert_eq!(BatchPhase::Collecting.as_str(), "collecting");
        assert_eq!(BatchPhase::GraphBuilding.to_string(), "graph_building");
    }
}
