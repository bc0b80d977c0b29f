//! Dense semantic ranker: brute-force cosine similarity over
//! per-document embeddings.
//!
//! Embeddings are computed once when a snapshot is built. A document
//! whose embedding fails is stored as a zero vector rather than
//! aborting the build; zero vectors score 0 against every query but
//! the document stays in the result set, so vector retrieval always
//! covers the whole corpus.

use crate::config::VECTOR_PRIORITY_DIVISOR;
use crate::embedding::{truncate_input, Embedder};
use crate::error::SearchError;
use crate::knowledge::KnowledgeStore;
use crate::search::priority_boost;
use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

/// How many document embeddings are requested concurrently at build time.
const EMBED_CONCURRENCY: usize = 8;

/// Per-document embeddings, aligned with corpus positions.
#[derive(Debug)]
pub struct VectorStore {
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl VectorStore {
    /// Embeds every document in the store.
    ///
    /// Embedding requests run a few at a time but results land in
    /// corpus order. Failures are isolated per document: the offending
    /// document gets a zero vector and a warning, and the build
    /// continues.
    #[instrument(skip_all, fields(doc_count = store.len()))]
    pub async fn build(store: &KnowledgeStore, embedder: &dyn Embedder) -> Self {
        let dimension = embedder.dimension();

        let embeddings: Vec<Vec<f32>> = stream::iter(store.documents())
            .map(|doc| async move {
                match embedder.embed(truncate_input(&doc.content)).await {
                    Ok(vector) if vector.len() == dimension => vector,
                    Ok(vector) => {
                        warn!(
                            id = %doc.id,
                            expected = dimension,
                            actual = vector.len(),
                            "document embedding has wrong dimension, substituting zero vector"
                        );
                        vec![0.0; dimension]
                    }
                    Err(error) => {
                        warn!(
                            id = %doc.id,
                            %error,
                            "document embedding failed, substituting zero vector"
                        );
                        vec![0.0; dimension]
                    }
                }
            })
            .buffered(EMBED_CONCURRENCY)
            .collect()
            .await;

        debug!(count = embeddings.len(), dimension, "vector store built");

        Self {
            embeddings,
            dimension,
        }
    }

    /// Ranks the corpus against an already-embedded query.
    ///
    /// Scores every document, applies the priority boost, and returns
    /// at most `top_k` `(corpus position, score)` pairs in descending
    /// score order. Zero and negative scores stay in the list; unlike
    /// the lexical ranker there is no relevance cutoff, so a large
    /// enough `top_k` always covers the whole corpus. Ties rank by
    /// corpus position.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DimensionMismatch`] if the query vector
    /// width differs from the indexed embeddings.
    pub fn search(
        &self,
        store: &KnowledgeStore,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<(usize, f32)>, SearchError> {
        if query_vector.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: query_vector.len(),
            });
        }

        let mut results: Vec<(usize, f32)> = Vec::with_capacity(store.len());
        for (idx, doc) in store.documents().iter().enumerate() {
            let raw = cosine_similarity(query_vector, &self.embeddings[idx]);
            let boosted =
                raw as f64 * priority_boost(doc.metadata.priority, VECTOR_PRIORITY_DIVISOR);
            results.push((idx, boosted as f32));
        }

        results.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        results.truncate(top_k);
        Ok(results)
    }

    /// Number of stored embeddings.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Whether any embeddings are stored.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// The embedding width every stored vector has.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0 when either vector has zero norm, which is how zero-vector
/// placeholder embeddings drop out of ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
