//! Shared types for the search modules.

use crate::knowledge::KnowledgeDocument;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{DEFAULT_BM25_WEIGHT, DEFAULT_VECTOR_WEIGHT};

/// Which ranker(s) produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Dense semantic ranker only.
    Vector,
    /// Sparse lexical ranker only.
    Bm25,
    /// Both rankers contributed to the fused score.
    Hybrid,
}

/// Per-ranker components behind a fused score.
///
/// Component scores are normalized to the `[0, 1]` range of their own
/// result list; a missing component means that ranker did not return
/// the document at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Normalized cosine-similarity score, if the vector ranker
    /// returned this document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_score: Option<f32>,
    /// Normalized BM25 score, if the lexical ranker returned this
    /// document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bm25_score: Option<f32>,
}

/// One ranked document, produced per search call.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    /// The matched document.
    pub document: Arc<KnowledgeDocument>,
    /// Final relevance score (meaning depends on the search mode).
    pub score: f32,
    /// Per-ranker components; present for hybrid results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    /// Which ranker(s) produced this result.
    pub match_kind: MatchKind,
}

/// Search mode, dispatched by a single match at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// Dense semantic ranking only.
    Vector,
    /// Sparse lexical ranking only.
    Bm25,
    /// Fused ranking with caller-supplied weights. The weights are not
    /// required to sum to 1; callers wanting strict interpolation must
    /// normalize them beforehand.
    Hybrid {
        /// Weight applied to the normalized vector score.
        vector_weight: f32,
        /// Weight applied to the normalized BM25 score.
        bm25_weight: f32,
    },
}

impl SearchMode {
    /// Hybrid mode with the default 0.6 / 0.4 weights.
    pub fn hybrid_default() -> Self {
        SearchMode::Hybrid {
            vector_weight: DEFAULT_VECTOR_WEIGHT,
            bm25_weight: DEFAULT_BM25_WEIGHT,
        }
    }
}

/// Index health snapshot for the stats surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    /// Number of indexed documents.
    pub total_documents: usize,
    /// Number of distinct terms in the lexical index.
    pub vocabulary_size: usize,
    /// Mean document length in tokens (0 for an empty corpus).
    pub average_document_length: f64,
    /// Configured term-frequency saturation parameter.
    pub k1: f64,
    /// Configured length-normalization strength.
    pub b: f64,
}
