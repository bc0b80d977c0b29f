//! Hybrid retrieval: a sparse lexical ranker, a dense vector ranker,
//! and score fusion over both, behind a single engine facade.
//!
//! The module split mirrors the data flow: [`tokenizer`] feeds
//! [`lexical`], the embedding collaborator feeds [`vector`], and
//! [`fusion`] merges their ranked lists. [`engine`] owns the snapshot
//! the rankers read and is the only public entry point callers need.

pub mod engine;
pub mod fusion;
pub mod lexical;
pub mod tokenizer;
pub mod types;
pub mod vector;

pub use engine::SearchEngine;
pub use types::{IndexStats, MatchKind, ScoreBreakdown, ScoredResult, SearchMode};

/// Multiplicative priority boost applied to a raw ranker score.
///
/// Priority is a small editorial importance signal on each document.
/// Each ranker dampens it with its own divisor, so the same priority
/// nudges lexical scores harder than vector scores.
pub(crate) fn priority_boost(priority: i64, divisor: f64) -> f64 {
    1.0 + priority as f64 / divisor
}
