//! Composite rank scoring from citation metrics.
//!
//! Weighted scoring: citations 50%, h-index 30%, i10-index 20%. Citations
//! are log-normalized to damp extreme values; h-index and i10-index are
//! linearly normalized against fixed ceilings.

use crate::error::{PipelineError, PipelineResult};

/// Citation count at which the log normalization reaches 1.0.
const CITATION_CEILING: f64 = 100_000.0;

/// h-index normalization ceiling.
const H_INDEX_CEILING: f64 = 150.0;

/// i10-index normalization ceiling.
const I10_INDEX_CEILING: f64 = 500.0;

const CITATION_WEIGHT: f64 = 0.5;
const H_INDEX_WEIGHT: f64 = 0.3;
const I10_INDEX_WEIGHT: f64 = 0.2;

/// Log-scale citation normalization.
///
/// Approaches 1.0 near 100,000 citations and intentionally exceeds 1.0 for
/// larger counts; the h-index and i10-index terms are clamped, this one is
/// not.
#[must_use]
pub fn normalized_citations(citations: i64) -> f64 {
    (citations.max(1) as f64).log10() / CITATION_CEILING.log10()
}

/// Compute the composite 0-100 rank score.
///
/// Pure and deterministic: identical inputs always yield bit-identical
/// output. Assumes non-negative inputs; callers validate with
/// [`validate_metrics`] first. Because the citation term is unclamped,
/// scores above 100 are possible past ~100k citations.
#[must_use]
pub fn score(citations: i64, h_index: i64, i10_index: i64) -> f64 {
    if citations <= 0 {
        return 0.0;
    }

    let normalized_h = (h_index as f64 / H_INDEX_CEILING).min(1.0);
    let normalized_i10 = (i10_index as f64 / I10_INDEX_CEILING).min(1.0);

    let weighted = CITATION_WEIGHT * normalized_citations(citations)
        + H_INDEX_WEIGHT * normalized_h
        + I10_INDEX_WEIGHT * normalized_i10;

    round2(weighted * 100.0)
}

/// Reject negative citation metrics at the call boundary.
pub fn validate_metrics(citations: i64, h_index: i64, i10_index: i64) -> PipelineResult<()> {
    for (field, value) in
        [("citations", citations), ("h_index", h_index), ("i10_index", i10_index)]
    {
        if value < 0 {
            return Err(PipelineError::validation(
                field,
                format!("must be non-negative, got {value}"),
            ));
        }
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
