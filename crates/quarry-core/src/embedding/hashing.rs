//! Deterministic offline embedder based on token feature hashing.
//!
//! Not a semantic model: it maps each token to a bucket of a
//! fixed-width vector via a stable hash and L2-normalizes the result.
//! Texts sharing vocabulary land near each other, which is enough for
//! the CLI to work without a model server and for tests to exercise the
//! vector path with reproducible geometry.

use super::Embedder;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Feature-hashing embedder. Deterministic, pure, never fails.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Creates an embedder producing vectors of the given width.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text.to_lowercase().split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            if token.is_empty() {
                continue;
            }
            vector[self.bucket(token)] += 1.0;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        Ok(vector)
    }
}
