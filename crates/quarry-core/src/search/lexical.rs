//! Sparse lexical ranker: a BM25 inverted index over the corpus.
//!
//! Built in one pass over the store at snapshot-construction time and
//! immutable afterwards. Scoring walks every document rather than
//! posting lists; corpora here are hundreds of passages, not millions,
//! and the dense walk keeps tie-breaking trivially stable.

use crate::config::{BM25_B, BM25_K1, LEXICAL_PRIORITY_DIVISOR};
use crate::knowledge::KnowledgeStore;
use crate::search::priority_boost;
use crate::search::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// BM25 free parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation. Higher values let repeated terms keep
    /// adding to the score for longer.
    pub k1: f64,
    /// Length-normalization strength, 0 (off) to 1 (full).
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: BM25_K1,
            b: BM25_B,
        }
    }
}

/// Term statistics for BM25 scoring, aligned with corpus positions.
#[derive(Debug)]
pub struct LexicalIndex {
    /// Per-document term counts, indexed by corpus position.
    term_frequencies: Vec<HashMap<String, u32>>,
    /// Number of documents each term occurs in.
    document_frequency: HashMap<String, u32>,
    /// Token count per document, indexed by corpus position.
    document_lengths: Vec<u32>,
    average_document_length: f64,
    params: Bm25Params,
}

impl LexicalIndex {
    /// Builds the index from every document in the store.
    #[instrument(skip_all, fields(doc_count = store.len()))]
    pub fn build(store: &KnowledgeStore) -> Self {
        Self::with_params(store, Bm25Params::default())
    }

    /// Builds the index with explicit BM25 parameters.
    pub fn with_params(store: &KnowledgeStore, params: Bm25Params) -> Self {
        let mut term_frequencies = Vec::with_capacity(store.len());
        let mut document_frequency: HashMap<String, u32> = HashMap::new();
        let mut document_lengths = Vec::with_capacity(store.len());
        let mut total_length: u64 = 0;

        for doc in store.documents() {
            let terms = tokenize(&doc.content);
            document_lengths.push(terms.len() as u32);
            total_length += terms.len() as u64;

            let mut counts: HashMap<String, u32> = HashMap::new();
            for term in terms {
                *counts.entry(term).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            term_frequencies.push(counts);
        }

        let average_document_length = if store.is_empty() {
            0.0
        } else {
            total_length as f64 / store.len() as f64
        };

        debug!(
            vocabulary = document_frequency.len(),
            avg_doc_len = average_document_length,
            "lexical index built"
        );

        Self {
            term_frequencies,
            document_frequency,
            document_lengths,
            average_document_length,
            params,
        }
    }

    /// BM25 contribution of one term to one document's score.
    ///
    /// Zero when the term is absent from the document. The idf factor
    /// goes negative for terms present in more than half the corpus,
    /// which lets ubiquitous terms drag a score below the inclusion
    /// threshold.
    fn term_score(&self, term: &str, doc_idx: usize) -> f64 {
        let tf = match self.term_frequencies[doc_idx].get(term) {
            Some(&tf) => tf as f64,
            None => return 0.0,
        };
        let df = f64::from(*self.document_frequency.get(term).unwrap_or(&0));
        let n = self.term_frequencies.len() as f64;

        let idf = ((n - df + 0.5) / (df + 0.5)).ln();
        let doc_len = f64::from(self.document_lengths[doc_idx]);
        let length_norm = 1.0 - self.params.b + self.params.b * doc_len / self.average_document_length;

        idf * (tf * (self.params.k1 + 1.0)) / (tf + self.params.k1 * length_norm)
    }

    /// Ranks the corpus against a query.
    ///
    /// Scores every document against the distinct query terms, applies
    /// the priority boost, keeps strictly positive scores, and returns
    /// at most `top_k` `(corpus position, score)` pairs in descending
    /// score order. Ties rank by corpus position.
    pub fn search(&self, store: &KnowledgeStore, query: &str, top_k: usize) -> Vec<(usize, f32)> {
        let mut seen = HashSet::new();
        let query_terms: Vec<String> = tokenize(query)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<(usize, f32)> = Vec::new();
        for (idx, doc) in store.documents().iter().enumerate() {
            let raw: f64 = query_terms
                .iter()
                .map(|term| self.term_score(term, idx))
                .sum();
            let boosted = raw * priority_boost(doc.metadata.priority, LEXICAL_PRIORITY_DIVISOR);
            if boosted > 0.0 {
                results.push((idx, boosted as f32));
            }
        }

        results.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        results.truncate(top_k);
        results
    }

    /// Number of distinct indexed terms.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Mean document length in tokens.
    pub fn average_document_length(&self) -> f64 {
        self.average_document_length
    }

    /// The BM25 parameters this index scores with.
    pub fn params(&self) -> Bm25Params {
        self.params
    }
}
