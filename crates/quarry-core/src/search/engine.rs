//! The search engine facade: snapshot ownership, mode dispatch, and
//! the degradation policy around the embedding collaborator.
//!
//! All index state lives in an immutable [`IndexSnapshot`] behind an
//! `RwLock<Arc<_>>`. Searches clone the `Arc` and never hold the lock
//! across ranking work; a reload builds a complete replacement snapshot
//! off to the side and swaps it in one write.

use crate::config::{EMBED_TIMEOUT, OVERFETCH_FACTOR};
use crate::embedding::{truncate_input, Embedder};
use crate::error::{EmbeddingError, SearchError};
use crate::knowledge::{KnowledgeDocument, KnowledgeStore};
use crate::search::fusion;
use crate::search::lexical::LexicalIndex;
use crate::search::types::{IndexStats, MatchKind, ScoredResult, SearchMode};
use crate::search::vector::VectorStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// One consistent view of the corpus: the store plus both indexes
/// built from exactly that store.
struct IndexSnapshot {
    store: KnowledgeStore,
    lexical: LexicalIndex,
    vectors: VectorStore,
}

impl IndexSnapshot {
    async fn build(
        documents: Vec<KnowledgeDocument>,
        embedder: &dyn Embedder,
    ) -> Result<Self, SearchError> {
        let store = KnowledgeStore::from_documents(documents)?;
        let lexical = LexicalIndex::build(&store);
        let vectors = VectorStore::build(&store, embedder).await;
        Ok(Self {
            store,
            lexical,
            vectors,
        })
    }
}

/// Hybrid retrieval engine over a fixed corpus snapshot.
pub struct SearchEngine {
    embedder: Arc<dyn Embedder>,
    snapshot: RwLock<Arc<IndexSnapshot>>,
}

impl SearchEngine {
    /// Builds an engine by indexing the given corpus.
    ///
    /// Per-document embedding failures degrade to zero vectors rather
    /// than failing the build; see [`VectorStore::build`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DuplicateDocument`] if two documents
    /// share an id.
    #[instrument(skip_all, fields(doc_count = documents.len()))]
    pub async fn build(
        documents: Vec<KnowledgeDocument>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, SearchError> {
        let snapshot = IndexSnapshot::build(documents, embedder.as_ref()).await?;
        info!(
            documents = snapshot.store.len(),
            vocabulary = snapshot.lexical.vocabulary_size(),
            dimension = snapshot.vectors.dimension(),
            "search engine ready"
        );
        Ok(Self {
            embedder,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Re-indexes a new corpus and atomically replaces the snapshot.
    ///
    /// Searches running against the old snapshot finish against it;
    /// searches starting after the swap see only the new corpus. On
    /// error the old snapshot stays in place untouched.
    #[instrument(skip_all, fields(doc_count = documents.len()))]
    pub async fn reload(&self, documents: Vec<KnowledgeDocument>) -> Result<(), SearchError> {
        let snapshot = IndexSnapshot::build(documents, self.embedder.as_ref()).await?;
        let mut guard = self.snapshot.write().await;
        *guard = Arc::new(snapshot);
        info!("index snapshot swapped");
        Ok(())
    }

    async fn current(&self) -> Arc<IndexSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Embeds a query, bounding the collaborator call with a deadline.
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbeddingError> {
        match timeout(EMBED_TIMEOUT, self.embedder.embed(truncate_input(query))).await {
            Ok(result) => result,
            Err(_) => Err(EmbeddingError::Timeout(EMBED_TIMEOUT)),
        }
    }

    /// Runs a search in the requested mode.
    #[instrument(skip(self), fields(query_len = query.len()))]
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        mode: SearchMode,
    ) -> Result<Vec<ScoredResult>, SearchError> {
        match mode {
            SearchMode::Bm25 => self.bm25_search(query, top_k).await,
            SearchMode::Vector => self.vector_search(query, top_k).await,
            SearchMode::Hybrid {
                vector_weight,
                bm25_weight,
            } => {
                self.hybrid_search(query, top_k, vector_weight, bm25_weight)
                    .await
            }
        }
    }

    /// Pure lexical ranking. Never touches the embedding collaborator.
    pub async fn bm25_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredResult>, SearchError> {
        let snapshot = self.current().await;
        let ranked = snapshot.lexical.search(&snapshot.store, query, top_k);
        materialize(&snapshot, ranked, MatchKind::Bm25)
    }

    /// Pure semantic ranking.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmbeddingUnavailable`] when the query
    /// cannot be embedded; unlike hybrid mode there is nothing to
    /// degrade to.
    pub async fn vector_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredResult>, SearchError> {
        let snapshot = self.current().await;
        let query_vector = self.embed_query(query).await?;
        let ranked = snapshot.vectors.search(&snapshot.store, &query_vector, top_k)?;
        materialize(&snapshot, ranked, MatchKind::Vector)
    }

    /// Fused ranking over both rankers.
    ///
    /// Each ranker is over-fetched so documents ranked just past
    /// `top_k` by one ranker can still surface after fusion. If the
    /// query embedding fails or times out, the call degrades to the
    /// unmixed lexical ranking instead of erroring.
    pub async fn hybrid_search(
        &self,
        query: &str,
        top_k: usize,
        vector_weight: f32,
        bm25_weight: f32,
    ) -> Result<Vec<ScoredResult>, SearchError> {
        let snapshot = self.current().await;
        let fetch = top_k.saturating_mul(OVERFETCH_FACTOR);
        let lexical = snapshot.lexical.search(&snapshot.store, query, fetch);

        let vector = match self.embed_query(query).await {
            Ok(query_vector) => {
                match snapshot.vectors.search(&snapshot.store, &query_vector, fetch) {
                    Ok(ranked) => Some(ranked),
                    Err(error) => {
                        warn!(%error, "vector ranker failed, serving lexical results only");
                        None
                    }
                }
            }
            Err(error) => {
                warn!(%error, "query embedding unavailable, serving lexical results only");
                None
            }
        };

        let Some(vector) = vector else {
            let mut ranked = lexical;
            ranked.truncate(top_k);
            return materialize(&snapshot, ranked, MatchKind::Bm25);
        };

        let hits = fusion::fuse(vector, lexical, vector_weight, bm25_weight, top_k);
        hits.into_iter()
            .map(|hit| {
                let document = snapshot
                    .store
                    .get(hit.doc)
                    .cloned()
                    .ok_or(SearchError::UnknownDocument(hit.doc))?;
                Ok(ScoredResult {
                    document,
                    score: hit.score,
                    breakdown: Some(hit.breakdown),
                    match_kind: hit.match_kind,
                })
            })
            .collect()
    }

    /// Index health for the stats surface.
    pub async fn stats(&self) -> IndexStats {
        let snapshot = self.current().await;
        let params = snapshot.lexical.params();
        IndexStats {
            total_documents: snapshot.store.len(),
            vocabulary_size: snapshot.lexical.vocabulary_size(),
            average_document_length: snapshot.lexical.average_document_length(),
            k1: params.k1,
            b: params.b,
        }
    }

    /// Number of documents in the current snapshot.
    pub async fn document_count(&self) -> usize {
        self.current().await.store.len()
    }

    /// Looks up a document in the current snapshot by id.
    pub async fn document_by_id(&self, id: &str) -> Option<Arc<KnowledgeDocument>> {
        self.current().await.store.by_id(id).cloned()
    }
}

/// Turns `(corpus position, score)` pairs into results for one ranker.
fn materialize(
    snapshot: &IndexSnapshot,
    ranked: Vec<(usize, f32)>,
    match_kind: MatchKind,
) -> Result<Vec<ScoredResult>, SearchError> {
    ranked
        .into_iter()
        .map(|(idx, score)| {
            let document = snapshot
                .store
                .get(idx)
                .cloned()
                .ok_or(SearchError::UnknownDocument(idx))?;
            Ok(ScoredResult {
                document,
                score,
                breakdown: None,
                match_kind,
            })
        })
        .collect()
}
