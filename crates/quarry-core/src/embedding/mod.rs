//! The embedding collaborator seam.
//!
//! The core never computes embeddings itself; it talks to an opaque
//! collaborator through the [`Embedder`] trait. Two implementations
//! ship with the crate: [`OllamaEmbedder`] for a local HTTP embedding
//! service and [`HashingEmbedder`], a deterministic offline stand-in
//! used as a fallback and in tests.

mod hashing;
mod ollama;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;

use crate::config::EMBED_INPUT_MAX_CHARS;
use crate::error::EmbeddingError;
use async_trait::async_trait;

/// An external model that turns text into a fixed-length vector.
///
/// Implementations must be deterministic for a given text and model,
/// and must report failures as errors rather than panicking; the engine
/// treats a failure as a per-document or per-query degradation, never a
/// hard crash.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// The fixed dimensionality of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embeds a piece of text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Truncates embedder input to [`EMBED_INPUT_MAX_CHARS`] characters.
///
/// Applied identically to documents at index time and queries at search
/// time so both end up in the same embedding space. Counts characters,
/// not bytes, so the cut never lands inside a UTF-8 sequence.
pub fn truncate_input(text: &str) -> &str {
    match text.char_indices().nth(EMBED_INPUT_MAX_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_untouched() {
        assert_eq!(truncate_input("short query"), "short query");
    }

    #[test]
    fn test_long_input_truncated_to_char_count() {
        let long = "a".repeat(EMBED_INPUT_MAX_CHARS + 100);
        let truncated = truncate_input(&long);
        assert_eq!(truncated.chars().count(), EMBED_INPUT_MAX_CHARS);
    }

    #[test]
    fn test_truncation_respects_multibyte_boundaries() {
        // 3-byte chars: naive byte slicing would panic mid-sequence.
        let long = "€".repeat(EMBED_INPUT_MAX_CHARS + 10);
        let truncated = truncate_input(&long);
        assert_eq!(truncated.chars().count(), EMBED_INPUT_MAX_CHARS);
        assert!(truncated.is_char_boundary(truncated.len()));
    }

    #[test]
    fn test_exact_length_input_untouched() {
        let exact = "x".repeat(EMBED_INPUT_MAX_CHARS);
        assert_eq!(truncate_input(&exact), exact);
    }
}
