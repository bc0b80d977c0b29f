//! # Quarry Core
//!
//! Hybrid retrieval over a fixed corpus of short knowledge passages.
//!
//! A query is ranked two ways — a sparse lexical ranker (BM25 over an
//! inverted index) and a dense semantic ranker (cosine similarity over
//! embeddings produced by an external collaborator) — and the two
//! rankings are fused into one ordered result list with per-document
//! priority boosts applied independently in each ranker.
//!
//! ## Modules
//!
//! - [`knowledge`] - the immutable document corpus and its metadata
//! - [`search`] - tokenizer, BM25 index, vector store, fusion, engine
//! - [`embedding`] - the `Embedder` trait and its implementations
//! - [`config`] - production configuration constants
//! - [`error`] - error taxonomy for search and embedding faults

pub mod config;
pub mod embedding;
pub mod error;
pub mod knowledge;
pub mod search;
// Test fixtures; compiled only for this crate's tests or for callers
// opting in via the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{EmbeddingError, SearchError};
pub use knowledge::{DocumentMetadata, KnowledgeDocument, KnowledgeStore};
pub use search::engine::SearchEngine;
pub use search::types::{IndexStats, MatchKind, ScoreBreakdown, ScoredResult, SearchMode};
