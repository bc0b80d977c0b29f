//! Production configuration constants.
//!
//! These values define the default behavior of the retrieval core and
//! are referenced from the search modules, the CLI, and tests to keep
//! everything consistent.

use std::time::Duration;

// =============================================================================
// Embedding Collaborator
// =============================================================================

/// Default embedding vector dimension.
///
/// Matches all-MiniLM-L6-v2, the sentence-transformer family the corpus
/// was originally embedded with. The actual dimension is decided by the
/// `Embedder` implementation; this is the default the CLI and tests use.
pub const EMBEDDING_DIM: usize = 384;

/// Maximum characters of input text sent to the embedding collaborator.
///
/// Applied identically to documents at index time and queries at search
/// time so both live in the same embedding space. Truncation is
/// char-boundary safe.
pub const EMBED_INPUT_MAX_CHARS: usize = 500;

/// Hard timeout around a single embedding call.
///
/// A timed-out call is treated as "vector ranker unavailable for this
/// request" and the engine degrades to lexical-only results.
pub const EMBED_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// BM25 Parameters
// =============================================================================

/// Term-frequency saturation parameter.
pub const BM25_K1: f64 = 1.5;

/// Document-length normalization strength.
pub const BM25_B: f64 = 0.75;

// =============================================================================
// Ranking and Fusion
// =============================================================================

/// Priority-boost divisor for the lexical (BM25) ranker: `1 + priority/50`.
pub const LEXICAL_PRIORITY_DIVISOR: f64 = 50.0;

/// Priority-boost divisor for the vector ranker: `1 + priority/100`.
///
/// Intentionally weaker than the lexical boost: cosine scores already
/// saturate near 1.0, so a smaller nudge is enough to break ties.
pub const VECTOR_PRIORITY_DIVISOR: f64 = 100.0;

/// Default fusion weight for the vector ranker.
pub const DEFAULT_VECTOR_WEIGHT: f32 = 0.6;

/// Default fusion weight for the BM25 ranker.
pub const DEFAULT_BM25_WEIGHT: f32 = 0.4;

/// Over-fetch multiplier for the underlying rankers during hybrid search.
///
/// Each ranker is asked for `OVERFETCH_FACTOR * top_k` candidates so
/// fusion has enough material even when the two methods disagree about
/// which documents are relevant.
pub const OVERFETCH_FACTOR: usize = 2;

// =============================================================================
// Corpus Loading
// =============================================================================

/// Minimum passage length in characters.
///
/// The corpus loader drops shorter passages before they reach the core;
/// fragments below this size carry too little signal to rank.
pub const MIN_PASSAGE_CHARS: usize = 50;
