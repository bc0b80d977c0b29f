//! Lexical tokenizer shared by index construction and query processing.
//!
//! Both sides must tokenize identically or term statistics and query
//! terms drift apart, so this is the only tokenizer in the crate.

/// English stop words excluded from lexical indexing and queries.
///
/// Kept sorted so membership is a binary search.
const STOP_WORDS: &[&str] = &[
    "a", "again", "an", "and", "are", "at", "be", "been", "being", "but", "by", "can", "could",
    "did", "do", "does", "down", "for", "from", "further", "had", "has", "have", "in", "is", "may",
    "might", "of", "off", "on", "once", "or", "out", "over", "should", "that", "the", "then",
    "these", "this", "those", "to", "under", "up", "was", "were", "will", "with", "would",
];

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.binary_search(&term).is_ok()
}

/// Splits text into lowercase terms for lexical scoring.
///
/// Word characters are alphanumerics plus underscore; every other
/// character acts as a separator. Terms of two characters or fewer and
/// stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut normalized = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            normalized.extend(c.to_lowercase());
        } else {
            normalized.push(' ');
        }
    }

    normalized
        .split_whitespace()
        .filter(|term| term.chars().count() > 2)
        .filter(|term| !is_stop_word(term))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_table_is_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOP_WORDS);
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Deep-Learning, applied (carefully)!"),
            vec!["deep", "learning", "applied", "carefully"]
        );
    }

    #[test]
    fn test_drops_short_terms_and_stop_words() {
        // "ml" is too short, "the"/"of" are stop words.
        assert_eq!(
            tokenize("the role of ml in diagnosis"),
            vec!["role", "diagnosis"]
        );
    }

    #[test]
    fn test_keeps_digits_and_underscores() {
        assert_eq!(
            tokenize("bm25 scoring for doc_id 12345"),
            vec!["bm25", "scoring", "doc_id", "12345"]
        );
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("... !!! ---").is_empty());
    }

    #[test]
    fn test_query_and_document_tokenization_agree() {
        let text = "Breast Cancer prognosis";
        assert_eq!(tokenize(text), tokenize(&text.to_uppercase()));
    }
}
