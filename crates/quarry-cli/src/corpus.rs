//! Corpus loading: a JSON array of passages on disk becomes the
//! document list the engine indexes.
//!
//! Passages shorter than the configured minimum are noise (headings,
//! stray fragments) and are skipped with a warning rather than indexed.

use anyhow::{Context, Result};
use quarry_core::config::MIN_PASSAGE_CHARS;
use quarry_core::KnowledgeDocument;
use std::path::Path;
use tracing::{info, warn};

/// Reads and filters the corpus file.
pub fn load_corpus(path: &Path) -> Result<Vec<KnowledgeDocument>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;
    let documents = parse_corpus(&raw)
        .with_context(|| format!("failed to parse corpus file {}", path.display()))?;
    info!(count = documents.len(), "corpus loaded");
    Ok(documents)
}

/// Parses a JSON array of documents, dropping too-short passages.
fn parse_corpus(raw: &str) -> Result<Vec<KnowledgeDocument>> {
    let documents: Vec<KnowledgeDocument> = serde_json::from_str(raw)?;
    Ok(documents
        .into_iter()
        .filter(|doc| {
            let long_enough = doc.content.chars().count() >= MIN_PASSAGE_CHARS;
            if !long_enough {
                warn!(id = %doc.id, "skipping passage shorter than {MIN_PASSAGE_CHARS} characters");
            }
            long_enough
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_documents_with_metadata() {
        let raw = r#"[
            {
                "id": "doc-1",
                "content": "A passage long enough to survive the minimum length filter applied at load time.",
                "metadata": {"type": "education", "priority": 8, "section": "Degrees"}
            }
        ]"#;

        let docs = parse_corpus(raw).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "doc-1");
        assert_eq!(docs[0].metadata.doc_type, "education");
        assert_eq!(docs[0].metadata.priority, 8);
        assert_eq!(docs[0].metadata.section.as_deref(), Some("Degrees"));
        assert_eq!(docs[0].metadata.source, None);
    }

    #[test]
    fn test_short_passages_are_dropped() {
        let raw = r#"[
            {"id": "short", "content": "too short", "metadata": {"type": "x", "priority": 1}},
            {
                "id": "long",
                "content": "This passage clears the minimum character threshold comfortably and is kept.",
                "metadata": {"type": "x", "priority": 1}
            }
        ]"#;

        let docs = parse_corpus(raw).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "long");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_corpus("not json at all").is_err());
        assert!(parse_corpus(r#"{"id": "not-an-array"}"#).is_err());
    }
}
