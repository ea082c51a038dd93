use std::collections::{HashMap, HashSet};

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::stopword;
use crate::analysis::token::{Content, Token};
use crate::keys::number::encode_value;

/// Turns raw content into a normalized, optionally weighted token list.
/// Deterministic; no I/O.
pub struct Analyzer {
    stemmer: Option<Stemmer>,
    punctuation: Regex,
    stopwords: HashSet<String>,
}

impl Analyzer {
    pub fn new(stem: bool) -> Self {
        Analyzer {
            stemmer: stem.then(|| Stemmer::create(Algorithm::English)),
            punctuation: Regex::new(r#"[.,\-/#!$%^&*;:{}=_`~()?'"’—]"#)
                .unwrap_or_else(|err| panic!("punctuation pattern: {}", err)),
            stopwords: stopword::english(),
        }
    }

    /// Analyze `content` into tokens.
    ///
    /// String content is diacritic-stripped, word-split, punctuation-stripped,
    /// lowercased, and optionally stemmed; duplicates are retained in
    /// document order. Non-string content yields exactly one synthetic token
    /// with weight zero.
    ///
    /// With `want_weights`, a token appearing `f` times among `n` distinct
    /// tokens in this document gets weight `ln(n / f)`. Deliberately
    /// per-document, not corpus-wide.
    ///
    /// Without `allow_duplicates`, non-string token lists are deduplicated
    /// and stopwords dropped.
    pub fn analyze(&self, content: &Content, want_weights: bool, allow_duplicates: bool) -> Vec<Token> {
        let words = match content {
            Content::Text(text) => self.normalize(text),
            Content::Value(value) => {
                let mut words = vec![encode_value(value)];
                if !allow_duplicates {
                    words.dedup();
                    words.retain(|word| !self.stopwords.contains(word));
                }
                return words.into_iter().map(|word| Token::new(word, 0.0)).collect();
            }
        };

        if !want_weights {
            return words.into_iter().map(|word| Token::new(word, 0.0)).collect();
        }

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            *occurrences.entry(word).or_insert(0) += 1;
        }
        let distinct = occurrences.len() as f64;

        words
            .iter()
            .map(|word| {
                let frequency = occurrences[word.as_str()] as f64;
                Token::new(word.clone(), (distinct / frequency).ln())
            })
            .collect()
    }

    /// Normalized word list for query text and similarity scoring.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.normalize(text)
    }

    fn normalize(&self, text: &str) -> Vec<String> {
        let stripped = strip_diacritics(text);

        stripped
            .unicode_words()
            .map(|word| {
                let word = self.punctuation.replace_all(word, "");
                word.to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .map(|word| match &self.stemmer {
                Some(stemmer) => stemmer.stem(&word).to_string(),
                None => word,
            })
            .collect()
    }
}

/// NFD-decompose and drop combining marks, so "café" tokenizes as "cafe".
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(false)
    }

    #[test]
    fn normalizes_text() {
        let tokens = analyzer().analyze(&Content::from("The Quick, FOX!"), false, false);
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, ["the", "quick", "fox"]);
    }

    #[test]
    fn strips_diacritics() {
        let tokens = analyzer().analyze(&Content::from("café naïve"), false, false);
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, ["cafe", "naive"]);
    }

    #[test]
    fn stems_when_enabled() {
        let tokens = Analyzer::new(true).analyze(&Content::from("running dogs"), false, false);
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, ["run", "dog"]);
    }

    #[test]
    fn weights_follow_frequency() {
        // "fox" appears twice among 2 distinct tokens: ln(2/2) = 0;
        // "quick" once: ln(2/1).
        let tokens = analyzer().analyze(&Content::from("fox quick fox"), true, false);
        let fox = tokens.iter().find(|t| t.word == "fox").unwrap();
        let quick = tokens.iter().find(|t| t.word == "quick").unwrap();
        assert_eq!(fox.idf, 0.0);
        assert!((quick.idf - 2.0_f64.ln()).abs() < 1e-12);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn single_occurrence_of_single_token_weighs_zero() {
        // One distinct token seen once: ln(1/1) = 0.
        let tokens = analyzer().analyze(&Content::from("fox"), true, false);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].idf, 0.0);
    }

    #[test]
    fn repeated_single_token_weighs_log_inverse_frequency() {
        // One distinct token seen three times: ln(1/3), negative.
        let tokens = analyzer().analyze(&Content::from("fox fox fox"), true, false);
        assert_eq!(tokens.len(), 3);
        assert!(
            tokens
                .iter()
                .all(|t| (t.idf - (1.0f64 / 3.0).ln()).abs() < 1e-12)
        );
    }

    #[test]
    fn non_string_content_collapses_to_one_token() {
        let content = Content::from(serde_json::json!({ "sku": 42 }));
        let tokens = analyzer().analyze(&content, true, false);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].idf, 0.0);
        // Deterministic across calls.
        assert_eq!(tokens, analyzer().analyze(&content, true, false));
    }
}
