//! The knowledge corpus: documents, metadata, and the immutable store.
//!
//! The store is built once from the ordered document list supplied by
//! the corpus-loading collaborator and never mutated afterwards. A
//! corpus update means building a fresh store and rebuilding both
//! indexes from it; the engine swaps the whole snapshot atomically.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Ranking-relevant and provenance metadata attached to a passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Free-form category tag. Never interpreted by ranking logic.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Ranking-boost signal; higher means more important. The source
    /// corpus uses 1-10 but no range is enforced.
    pub priority: i64,
    /// Provenance label, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Provenance label, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A single knowledge passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Opaque unique id, stable for the lifetime of the corpus.
    pub id: String,
    /// The passage text. The corpus loader guarantees non-trivial length.
    pub content: String,
    /// Metadata for ranking boosts and provenance.
    pub metadata: DocumentMetadata,
}

/// The immutable ordered document collection both rankers index against.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    documents: Vec<Arc<KnowledgeDocument>>,
    positions: HashMap<String, usize>,
}

impl KnowledgeStore {
    /// Builds a store from the ordered document list.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DuplicateDocument`] if two documents share
    /// an id; id uniqueness within a corpus snapshot is an invariant
    /// everything downstream relies on.
    pub fn from_documents(documents: Vec<KnowledgeDocument>) -> Result<Self, SearchError> {
        let mut positions = HashMap::with_capacity(documents.len());
        let docs: Vec<Arc<KnowledgeDocument>> = documents.into_iter().map(Arc::new).collect();

        for (idx, doc) in docs.iter().enumerate() {
            if positions.insert(doc.id.clone(), idx).is_some() {
                return Err(SearchError::DuplicateDocument(doc.id.clone()));
            }
        }

        Ok(Self {
            documents: docs,
            positions,
        })
    }

    /// The documents in corpus order.
    pub fn documents(&self) -> &[Arc<KnowledgeDocument>] {
        &self.documents
    }

    /// Looks up a document by id.
    pub fn by_id(&self, id: &str) -> Option<&Arc<KnowledgeDocument>> {
        self.positions.get(id).map(|&idx| &self.documents[idx])
    }

    /// The document at a corpus position.
    pub fn get(&self, idx: usize) -> Option<&Arc<KnowledgeDocument>> {
        self.documents.get(idx)
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::doc;

    #[test]
    fn test_store_preserves_order() {
        let store = KnowledgeStore::from_documents(vec![
            doc("b", "second passage about retrieval engines and ranking", 5),
            doc("a", "first passage about embeddings and cosine similarity", 5),
        ])
        .unwrap();

        let ids: Vec<&str> = store.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_by_id_lookup() {
        let store = KnowledgeStore::from_documents(vec![
            doc("x", "a passage about bm25 scoring and inverted indexes", 3),
            doc("y", "a passage about dense vectors and semantic search", 7),
        ])
        .unwrap();

        assert_eq!(store.by_id("y").unwrap().metadata.priority, 7);
        assert!(store.by_id("z").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = KnowledgeStore::from_documents(vec![
            doc("same", "the first of two documents sharing an identifier", 1),
            doc("same", "the second of two documents sharing an identifier", 2),
        ]);

        assert!(matches!(result, Err(SearchError::DuplicateDocument(id)) if id == "same"));
    }

    #[test]
    fn test_empty_store() {
        let store = KnowledgeStore::from_documents(vec![]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.by_id("anything").is_none());
    }

    #[test]
    fn test_metadata_round_trips_through_json() {
        let original = doc("j", "a passage that travels through serde json and back", 9);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: KnowledgeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
        // The category tag serializes under its original wire name.
        assert!(json.contains("\"type\""));
    }
}
