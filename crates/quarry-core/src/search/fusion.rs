//! Score fusion: merges the two rankers' lists into one hybrid ranking.
//!
//! Raw BM25 scores and cosine similarities live on incompatible scales,
//! so each list is first normalized by its own maximum. The fused score
//! is then a weighted sum, with a missing component counting as zero.

use crate::search::types::{MatchKind, ScoreBreakdown};
use std::collections::HashMap;

/// One merged entry, still addressed by corpus position.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedHit {
    /// Corpus position of the document.
    pub doc: usize,
    /// Weighted sum of the normalized component scores.
    pub score: f32,
    /// The normalized components that produced the score.
    pub breakdown: ScoreBreakdown,
    /// Which rankers returned this document.
    pub match_kind: MatchKind,
}

/// Scales a ranked list so its best score becomes 1.0.
///
/// A list whose maximum is not positive normalizes to all zeros; this
/// guards division by zero and keeps a degenerate ranker from
/// dominating the weighted sum.
fn max_normalize(results: &mut [(usize, f32)]) {
    let max = results
        .iter()
        .map(|&(_, score)| score)
        .fold(0.0f32, f32::max);
    for entry in results.iter_mut() {
        entry.1 = if max > 0.0 { entry.1 / max } else { 0.0 };
    }
}

/// Merges the two ranked lists into at most `top_k` fused hits.
///
/// Input lists are consumed because normalization rescales them in
/// place. Output is ordered by descending fused score, ties broken by
/// corpus position.
pub fn fuse(
    mut vector: Vec<(usize, f32)>,
    mut lexical: Vec<(usize, f32)>,
    vector_weight: f32,
    bm25_weight: f32,
    top_k: usize,
) -> Vec<FusedHit> {
    max_normalize(&mut vector);
    max_normalize(&mut lexical);

    let mut components: HashMap<usize, (Option<f32>, Option<f32>)> = HashMap::new();
    for (doc, score) in vector {
        components.entry(doc).or_insert((None, None)).0 = Some(score);
    }
    for (doc, score) in lexical {
        components.entry(doc).or_insert((None, None)).1 = Some(score);
    }

    let mut hits: Vec<FusedHit> = components
        .into_iter()
        .map(|(doc, (vector_score, bm25_score))| {
            let match_kind = match (vector_score, bm25_score) {
                (Some(_), Some(_)) => MatchKind::Hybrid,
                (Some(_), None) => MatchKind::Vector,
                _ => MatchKind::Bm25,
            };
            FusedHit {
                doc,
                score: vector_weight * vector_score.unwrap_or(0.0)
                    + bm25_weight * bm25_score.unwrap_or(0.0),
                breakdown: ScoreBreakdown {
                    vector_score,
                    bm25_score,
                },
                match_kind,
            }
        })
        .collect();

    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc.cmp(&b.doc)));
    hits.truncate(top_k);
    hits
}
