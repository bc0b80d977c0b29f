//! Output formatting for search results and index statistics.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use quarry_core::{IndexStats, MatchKind, ScoredResult};
use serde::Serialize;

/// Maximum characters to show in a content snippet
const SNIPPET_MAX_LEN: usize = 200;

/// JSON output structure for search results
#[derive(Serialize)]
pub struct JsonOutput {
    pub query: String,
    pub results: Vec<JsonResult>,
}

/// Single result in JSON format
#[derive(Serialize)]
pub struct JsonResult {
    /// Document id
    pub id: String,
    /// Fused or single-ranker score
    pub score: f32,
    /// Which ranker(s) produced the result
    pub match_kind: MatchKind,
    /// Normalized semantic component, hybrid mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_score: Option<f32>,
    /// Normalized lexical component, hybrid mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bm25_score: Option<f32>,
    /// Document category tag
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Document priority
    pub priority: i64,
    /// Truncated passage text
    pub snippet: String,
}

impl From<&ScoredResult> for JsonResult {
    fn from(result: &ScoredResult) -> Self {
        Self {
            id: result.document.id.clone(),
            score: result.score,
            match_kind: result.match_kind,
            vector_score: result.breakdown.and_then(|b| b.vector_score),
            bm25_score: result.breakdown.and_then(|b| b.bm25_score),
            doc_type: result.document.metadata.doc_type.clone(),
            priority: result.document.metadata.priority,
            snippet: truncate_text(&result.document.content, SNIPPET_MAX_LEN),
        }
    }
}

/// Formats search results as JSON.
pub fn format_json(query: &str, results: &[ScoredResult]) -> String {
    let output = JsonOutput {
        query: query.to_string(),
        results: results.iter().map(JsonResult::from).collect(),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats search results for human-readable terminal output.
pub fn format_human(query: &str, results: &[ScoredResult]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{}\"", query);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Found {} result{} for \"{}\":\n\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        query
    ));

    for (i, result) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (score: {:.3}, {})\n",
            i + 1,
            result.document.id,
            result.score,
            match_kind_label(result.match_kind),
        ));

        if let Some(breakdown) = result.breakdown {
            let mut score_parts = Vec::new();
            if let Some(vs) = breakdown.vector_score {
                score_parts.push(format!("semantic: {:.3}", vs));
            }
            if let Some(bs) = breakdown.bm25_score {
                score_parts.push(format!("keyword: {:.3}", bs));
            }
            if !score_parts.is_empty() {
                output.push_str(&format!("   [{}]\n", score_parts.join(", ")));
            }
        }

        output.push_str(&format!(
            "   {}\n\n",
            truncate_text(&result.document.content, SNIPPET_MAX_LEN)
        ));
    }

    output.trim_end().to_string()
}

/// JSON rendering of index statistics.
pub fn format_stats_json(stats: &IndexStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string())
}

/// Human-readable rendering of index statistics.
pub fn format_stats_human(stats: &IndexStats) -> String {
    format!(
        "Documents:           {}\n\
         Vocabulary:          {} terms\n\
         Avg document length: {:.1} tokens\n\
         BM25 parameters:     k1 = {}, b = {}",
        stats.total_documents,
        stats.vocabulary_size,
        stats.average_document_length,
        stats.k1,
        stats.b,
    )
}

fn match_kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Vector => "semantic",
        MatchKind::Bm25 => "keyword",
        MatchKind::Hybrid => "hybrid",
    }
}

/// Truncates text on a character boundary, appending an ellipsis.
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx].trim_end()),
        None => text,
    }
}
