//! Collaboration edge inference: direction and strength for a researcher
//! pair with a known co-publication count.

use crate::models::{CollaborationEdge, Direction, EnrichedResearcher};

use super::rank;

/// Rank-score dominance ratio separating mentor/student from peer.
const DOMINANCE_RATIO: f64 = 1.5;

/// Fallback divisor when a publication total is unknown: ten shared
/// publications count as full strength.
const FALLBACK_DIVISOR: f64 = 10.0;

/// Infer the collaboration edge from `a` to `b`.
///
/// Direction comes from the rank scores recomputed from each side's citation
/// metrics: a score dominating the other by more than 1.5x marks the senior
/// party; ties and near-ties are peers. Strength is the co-publication count
/// against the harmonic mean of both publication totals, clamped to [0, 1];
/// when either total is unknown the fallback ratio applies instead.
#[must_use]
pub fn infer(
    a: &EnrichedResearcher,
    b: &EnrichedResearcher,
    co_publications: i64,
    total_pubs_a: i64,
    total_pubs_b: i64,
) -> CollaborationEdge {
    let score_a = rank::score(a.citations, a.h_index, a.i10_index);
    let score_b = rank::score(b.citations, b.h_index, b.i10_index);

    let direction = if score_a > DOMINANCE_RATIO * score_b {
        Direction::MentorToStudent
    } else if score_b > DOMINANCE_RATIO * score_a {
        Direction::StudentToMentor
    } else {
        Direction::Peer
    };

    CollaborationEdge {
        source: a.identity_key(),
        target: b.identity_key(),
        direction,
        strength: strength(co_publications, total_pubs_a, total_pubs_b),
        co_publications,
    }
}

/// Collaboration strength in [0, 1].
#[must_use]
pub fn strength(co_publications: i64, total_pubs_a: i64, total_pubs_b: i64) -> f64 {
    if co_publications <= 0 {
        return 0.0;
    }

    let co = co_publications as f64;
    let raw = if total_pubs_a > 0 && total_pubs_b > 0 {
        let (a, b) = (total_pubs_a as f64, total_pubs_b as f64);
        let harmonic_mean = 2.0 * a * b / (a + b);
        co / harmonic_mean
    } else {
        co / FALLBACK_DIVISOR
    };

    raw.min(1.0)
}
