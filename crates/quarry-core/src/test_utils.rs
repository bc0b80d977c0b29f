//! Shared fixtures for unit and integration tests.

use crate::embedding::{Embedder, HashingEmbedder};
use crate::error::EmbeddingError;
use crate::knowledge::{DocumentMetadata, KnowledgeDocument};
use async_trait::async_trait;
use std::time::Duration;

/// Builds a test document with the given id, content, and priority.
pub fn doc(id: &str, content: &str, priority: i64) -> KnowledgeDocument {
    KnowledgeDocument {
        id: id.to_owned(),
        content: content.to_owned(),
        metadata: DocumentMetadata {
            doc_type: "passage".to_owned(),
            priority,
            section: None,
            source: None,
        },
    }
}

/// Embedder returning the same unit vector for every input.
///
/// Makes every document equidistant from every query, which isolates
/// priority and tie-breaking behavior from embedding geometry.
pub struct StaticEmbedder {
    dimension: usize,
}

impl StaticEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0; self.dimension];
        vector[0] = 1.0;
        Ok(vector)
    }
}

/// Embedder that fails every call.
pub struct FailingEmbedder {
    dimension: usize,
}

impl FailingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Backend(
            "embedding service unavailable".to_owned(),
        ))
    }
}

/// Embedder that sleeps before answering, for exercising deadlines
/// under `tokio::test(start_paused = true)`.
pub struct SlowEmbedder {
    inner: StaticEmbedder,
    delay: Duration,
}

impl SlowEmbedder {
    pub fn new(dimension: usize, delay: Duration) -> Self {
        Self {
            inner: StaticEmbedder::new(dimension),
            delay,
        }
    }
}

#[async_trait]
impl Embedder for SlowEmbedder {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed(text).await
    }
}

/// Embedder that fails only for inputs containing a marker substring,
/// delegating everything else to a [`HashingEmbedder`].
pub struct ContentFailEmbedder {
    needle: String,
    inner: HashingEmbedder,
}

impl ContentFailEmbedder {
    pub fn new(needle: &str, dimension: usize) -> Self {
        Self {
            needle: needle.to_owned(),
            inner: HashingEmbedder::new(dimension),
        }
    }
}

#[async_trait]
impl Embedder for ContentFailEmbedder {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.contains(&self.needle) {
            return Err(EmbeddingError::Backend(format!(
                "refusing input containing {:?}",
                self.needle
            )));
        }
        self.inner.embed(text).await
    }
}
