//! Output formatting for graph results.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::models::{EnrichedResearcher, GraphResult};

/// Maximum rows in the Markdown top-researcher and strongest-edge sections.
const SUMMARY_ROWS: usize = 10;

/// Format a graph result as a human-readable Markdown summary.
#[must_use]
pub fn format_graph_markdown(graph: &GraphResult) -> String {
    if graph.is_empty() {
        return "No researchers found.".to_string();
    }

    let mut output = format!(
        "# Collaboration Graph\n\n\
         **Nodes:** {} | **Edges:** {}\n\
         **Generated:** {}\n\n",
        graph.meta.total_nodes,
        graph.meta.total_edges,
        graph.meta.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    // Region rollup
    let mut by_region: BTreeMap<&str, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *by_region.entry(node.region.as_str()).or_default() += 1;
    }
    output.push_str("## Researchers by Region\n\n");
    for (region, count) in &by_region {
        output.push_str(&format!("- **{region}**: {count}\n"));
    }
    output.push('\n');

    // Top researchers
    let mut ranked: Vec<&EnrichedResearcher> = graph.nodes.iter().collect();
    ranked.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));

    output.push_str("## Top Researchers\n\n");
    for (i, node) in ranked.iter().take(SUMMARY_ROWS).enumerate() {
        let location = match (&node.institution, &node.country) {
            (Some(institution), Some(country)) => format!("{institution}, {country}"),
            (Some(institution), None) => institution.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => "Unknown affiliation".to_string(),
        };
        output.push_str(&format!(
            "**{}. {}** - score {:.2}\n   - {} | {} citations\n\n",
            i + 1,
            node.name,
            node.rank_score,
            location,
            node.citations
        ));
    }

    // Strongest edges
    if !graph.edges.is_empty() {
        let mut edges: Vec<_> = graph.edges.iter().collect();
        edges.sort_by(|a, b| b.strength.total_cmp(&a.strength));

        output.push_str("## Strongest Collaborations\n\n");
        for edge in edges.iter().take(SUMMARY_ROWS) {
            output.push_str(&format!(
                "- {} -> {} ({}, strength {:.3}, {} shared publications)\n",
                edge.source, edge.target, edge.direction, edge.strength, edge.co_publications
            ));
        }
    }

    output
}

/// Create a compact researcher representation for JSON output.
#[must_use]
pub fn compact_node(node: &EnrichedResearcher) -> Value {
    let mut obj = json!({
        "id": node.identity_key(),
        "name": node.name,
        "region": node.region,
        "citations": node.citations,
        "rankScore": node.rank_score,
    });

    // Add optional fields only if present
    if let Some(ref institution) = node.institution {
        obj["institution"] = json!(institution);
    }

    if let Some(ref country) = node.country {
        obj["country"] = json!(country);
    }

    if !node.categories.is_empty() {
        obj["categories"] = json!(node.categories);
    }

    obj
}

/// Create a compact graph representation for JSON output.
#[must_use]
pub fn compact_graph(graph: &GraphResult) -> Value {
    json!({
        "nodes": graph.nodes.iter().map(compact_node).collect::<Vec<_>>(),
        "edges": graph.edges,
        "meta": graph.meta,
    })
}
