//! End-to-end batch pipeline tests: enrichment, deduplication, edge
//! inference, and graph filtering.

use scholar_graph::models::{
    CoPublicationCounts, Direction, GraphFilter, RawProfileRecord, Region,
};
use scholar_graph::{Config, IngestionPipeline, PipelineError};

fn pipeline() -> IngestionPipeline {
    IngestionPipeline::new(Config::default())
}

fn record(
    scholar_id: &str,
    name: &str,
    affiliation: Option<&str>,
    citations: i64,
    h_index: i64,
    i10_index: i64,
    paper_count: Option<i64>,
) -> RawProfileRecord {
    RawProfileRecord {
        scholar_id: scholar_id.to_string(),
        name: name.to_string(),
        affiliation: affiliation.map(ToString::to_string),
        citations,
        h_index,
        i10_index,
        paper_count,
        ..Default::default()
    }
}

fn senior() -> RawProfileRecord {
    record(
        "senior1",
        "Jane Smith",
        Some("MIT, Cambridge, United States"),
        50_000,
        140,
        480,
        Some(20),
    )
}

fn junior() -> RawProfileRecord {
    record("junior1", "John Doe", Some("Stanford University"), 100, 10, 5, Some(10))
}

// =============================================================================
// run_batch
// =============================================================================

#[tokio::test]
async fn test_run_batch_builds_enriched_nodes_and_edges() {
    let mut counts = CoPublicationCounts::new();
    counts.record("senior1", "junior1", 5);

    let graph = pipeline().run_batch(vec![senior(), junior()], &counts).await.unwrap();

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.meta.total_nodes, 2);
    assert_eq!(graph.meta.total_edges, 1);

    let jane = &graph.nodes[0];
    assert_eq!(jane.country.as_deref(), Some("United States"));
    assert_eq!(jane.region, Region::NorthAmerica);
    assert!(jane.rank_score > 90.0);

    let john = &graph.nodes[1];
    assert!(john.country.is_none());
    assert_eq!(john.region, Region::Unknown);

    let edge = &graph.edges[0];
    // Pairs are walked in normalized key order, so the edge reads
    // junior -> senior; the senior's rank dominates by well over 1.5x.
    assert_eq!(edge.source, "junior1");
    assert_eq!(edge.target, "senior1");
    assert_eq!(edge.direction, Direction::StudentToMentor);
    assert_eq!(edge.co_publications, 5);
    // 5 / harmonic_mean(10, 20) = 5 / 13.33... = 0.375
    assert!((edge.strength - 0.375).abs() < 1e-9);
}

#[tokio::test]
async fn test_run_batch_empty_input_is_valid() {
    let graph = pipeline().run_batch(vec![], &CoPublicationCounts::new()).await.unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.meta.total_nodes, 0);
}

#[tokio::test]
async fn test_run_batch_deduplicates_by_id_and_name() {
    let records = vec![
        record("a1", "Jane Smith", None, 2000, 20, 50, None),
        record("a1", "J Smith", None, 2000, 20, 50, None),
        record("b2", "jane smith", None, 3000, 30, 60, None),
        record("", "Carol Jones", None, 1500, 15, 40, None),
        record("", "carol   JONES", None, 1500, 15, 40, None),
    ];

    let graph = pipeline().run_batch(records, &CoPublicationCounts::new()).await.unwrap();

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].scholar_id, "a1");
    assert_eq!(graph.nodes[1].name, "Carol Jones");

    // No two survivors share an identity key.
    let mut keys: Vec<String> =
        graph.nodes.iter().map(|n| n.identity_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), graph.nodes.len());
}

#[tokio::test]
async fn test_run_batch_malformed_records_never_fail_the_batch() {
    let records = vec![
        record("a1", "Jane Smith", Some(",,,,"), 2000, 20, 50, None),
        {
            let mut r = record("b2", "Broken Metrics", Some("MIT, United States"), -5, -1, -1, None);
            r.homepage = Some("::not a url::".to_string());
            r
        },
        record("c3", "Fine Researcher", Some("ETH Zurich, Switzerland"), 4000, 40, 90, None),
    ];

    let graph = pipeline().run_batch(records, &CoPublicationCounts::new()).await.unwrap();

    // All three records survive, degraded where necessary.
    assert_eq!(graph.nodes.len(), 3);
    let broken = &graph.nodes[1];
    assert_eq!(broken.rank_score, 0.0);
    assert!(broken.homepage.is_none());
    let fine = &graph.nodes[2];
    assert_eq!(fine.region, Region::Europe);
}

#[tokio::test]
async fn test_run_batch_rejects_negative_co_publication_counts() {
    let mut counts = CoPublicationCounts::new();
    counts.record("a", "b", -3);

    let err = pipeline().run_batch(vec![senior()], &counts).await.unwrap_err();
    assert!(matches!(err, PipelineError::Validation { ref field, .. } if field == "coPublications"));
}

#[tokio::test]
async fn test_run_batch_applies_edge_admission_floor() {
    // Default floor is 2 co-publications.
    let mut counts = CoPublicationCounts::new();
    counts.record("senior1", "junior1", 1);

    let graph = pipeline().run_batch(vec![senior(), junior()], &counts).await.unwrap();
    assert!(graph.edges.is_empty());
}

#[tokio::test]
async fn test_run_batch_skips_pairs_with_unknown_endpoints() {
    let mut counts = CoPublicationCounts::new();
    counts.record("senior1", "stranger", 9);

    let graph = pipeline().run_batch(vec![senior(), junior()], &counts).await.unwrap();
    assert!(graph.edges.is_empty());
}

#[tokio::test]
async fn test_run_batch_name_keyed_pairs_connect_unidentified_records() {
    // Records without scholar ids are addressed by normalized name.
    let mut counts = CoPublicationCounts::new();
    counts.record("jane smith", "john doe", 4);

    let records = vec![
        record("", "Jane Smith", None, 5000, 50, 100, Some(30)),
        record("", "John Doe", None, 4000, 45, 90, Some(30)),
    ];
    let graph = pipeline().run_batch(records, &counts).await.unwrap();

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].direction, Direction::Peer);
}

#[tokio::test]
async fn test_run_batch_edges_are_deterministically_ordered() {
    let mut counts = CoPublicationCounts::new();
    counts.record("c", "a", 3);
    counts.record("b", "a", 3);
    counts.record("c", "b", 3);

    let records = vec![
        record("a", "Alice", None, 1000, 10, 10, Some(20)),
        record("b", "Bob", None, 1000, 10, 10, Some(20)),
        record("c", "Carol", None, 1000, 10, 10, Some(20)),
    ];

    let first = pipeline().run_batch(records.clone(), &counts).await.unwrap();
    let second = pipeline().run_batch(records, &counts).await.unwrap();

    let order: Vec<(String, String)> =
        first.edges.iter().map(|e| (e.source.clone(), e.target.clone())).collect();
    assert_eq!(
        order,
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
            ("b".to_string(), "c".to_string()),
        ]
    );
    assert_eq!(first.edges, second.edges);
}

#[tokio::test]
async fn test_run_batch_fallback_strength_without_paper_counts() {
    let mut counts = CoPublicationCounts::new();
    counts.record("a", "b", 5);

    let records = vec![
        record("a", "Alice", None, 1000, 10, 10, None),
        record("b", "Bob", None, 1000, 10, 10, Some(20)),
    ];
    let graph = pipeline().run_batch(records, &counts).await.unwrap();

    // One unknown total: co / 10 fallback.
    assert_eq!(graph.edges[0].strength, 0.5);
}

// =============================================================================
// run_batch_filtered
// =============================================================================

#[tokio::test]
async fn test_run_batch_filtered_prunes_nodes_and_orphaned_edges() {
    let mut counts = CoPublicationCounts::new();
    counts.record("senior1", "junior1", 5);

    let filter = GraphFilter { min_citations: Some(1000), ..Default::default() };
    let graph = pipeline()
        .run_batch_filtered(vec![senior(), junior()], &counts, &filter)
        .await
        .unwrap();

    // Junior falls below the citation floor; the edge loses an endpoint.
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert!(graph.meta.filter.is_some());
}

#[tokio::test]
async fn test_run_batch_filtered_by_category() {
    let mut slam_record = senior();
    slam_record.interests = vec!["visual slam".to_string()];
    let other = junior();

    let filter = GraphFilter {
        categories: Some(vec!["slam".to_string()]),
        ..Default::default()
    };
    let graph = pipeline()
        .run_batch_filtered(vec![slam_record, other], &CoPublicationCounts::new(), &filter)
        .await
        .unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.nodes[0].in_category("slam"));
}

// =============================================================================
// enrich (public single-record surface)
// =============================================================================

#[test]
fn test_enrich_affiliation_reference_cases() {
    let p = pipeline();

    let mit = p.enrich(record(
        "x",
        "A",
        Some("MIT, Cambridge, United States"),
        1000,
        10,
        10,
        None,
    ));
    assert!(mit.institution.unwrap().contains("MIT"));
    assert_eq!(mit.country.as_deref(), Some("United States"));
    assert_eq!(mit.region, Region::NorthAmerica);

    let stanford = p.enrich(record("y", "B", Some("Stanford University"), 1000, 10, 10, None));
    assert!(stanford.country.is_none());
    assert_eq!(stanford.region, Region::Unknown);
}

#[test]
fn test_enrich_rank_score_is_pure() {
    let p = pipeline();
    let a = p.enrich(record("x", "A", None, 12_345, 42, 137, None));
    let b = p.enrich(record("y", "B", None, 12_345, 42, 137, None));
    assert_eq!(a.rank_score.to_bits(), b.rank_score.to_bits());
}
