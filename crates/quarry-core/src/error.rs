//! Error types for the retrieval core.
//!
//! Two deliberately small taxonomies: [`EmbeddingError`] for faults of
//! the external embedding collaborator, and [`SearchError`] for
//! everything the search engine itself can report. Empty corpus and
//! empty query are not errors anywhere in this crate; both simply
//! produce empty result lists.

use thiserror::Error;

/// Errors raised by the embedding collaborator.
///
/// Per-document failures during index build never surface through this
/// type — the build substitutes a zero vector and continues. These
/// errors are seen for query-time embedding and collaborator-wide
/// outages.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// The backend rejected the request or the transport failed.
    #[error("embedding backend error: {0}")]
    Backend(String),
    /// The call exceeded the configured timeout.
    #[error("embedding call timed out after {0:?}")]
    Timeout(std::time::Duration),
    /// The backend answered with something that is not an embedding.
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

/// Errors reported by the search engine.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The embedding collaborator failed or timed out, so the vector
    /// ranker could not serve this request.
    #[error("vector ranker unavailable: {0}")]
    EmbeddingUnavailable(#[from] EmbeddingError),
    /// Two documents in one corpus snapshot share an id.
    #[error("duplicate document id: {0}")]
    DuplicateDocument(String),
    /// A scored document could not be resolved in the knowledge store.
    /// Indicates index/store desynchronization, an internal fault.
    #[error("unknown document at corpus position {0}")]
    UnknownDocument(usize),
    /// An embedding had the wrong width for this index.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the vector store was built with
        expected: usize,
        /// Dimension actually received
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_error_converts_to_search_error() {
        let err = EmbeddingError::Backend("connection refused".to_string());
        let search_err: SearchError = err.into();
        assert!(matches!(search_err, SearchError::EmbeddingUnavailable(_)));
        assert!(search_err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = SearchError::DimensionMismatch {
            expected: 384,
            actual: 512,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 384, got 512");
    }
}
