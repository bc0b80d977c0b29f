//! HTTP client for an Ollama-compatible embedding service.
//!
//! The service is the "embedding collaborator" of the system: a network
//! endpoint that may be slow, unreachable, or answer garbage. All of
//! those become [`EmbeddingError`] values the engine can degrade on.

use super::Embedder;
use crate::config::EMBED_TIMEOUT;
use crate::error::EmbeddingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embedding: Option<Vec<f32>>,
    #[serde(default)]
    embeddings: Option<Vec<Vec<f32>>>,
}

/// Embedding client backed by an Ollama `/api/embed` endpoint.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

impl OllamaEmbedder {
    /// Creates a client for the given endpoint and model.
    ///
    /// `dimension` must match what the model actually produces; the
    /// response is validated against it on every call.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(EMBED_TIMEOUT)
            .build()
            .map_err(|e| EmbeddingError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            dimension,
        })
    }

    /// The model name sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbedRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout(EMBED_TIMEOUT)
                } else {
                    EmbeddingError::Backend(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::Backend(format!(
                "embedding service returned {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let embedding = if let Some(embedding) = body.embedding {
            embedding
        } else if let Some(embeddings) = body.embeddings {
            embeddings
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::InvalidResponse("empty embeddings array".into()))?
        } else {
            return Err(EmbeddingError::InvalidResponse(
                "no embedding field in response".into(),
            ));
        };

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                embedding.len()
            )));
        }

        Ok(embedding)
    }
}
