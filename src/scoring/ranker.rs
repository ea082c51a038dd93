use std::collections::HashMap;

use crate::analysis::analyzer::Analyzer;

/// Candidate content handed to the similarity stage, either raw text or the
/// token list recovered from a stored document record.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedContent {
    Text(String),
    Tokens(Vec<String>),
}

/// Similarity algorithm selected at construction. A capability, not a class
/// hierarchy: callers may plug in any scoring function.
pub enum RankAlgorithm {
    /// Cosine similarity over term-frequency vectors; raw text is analyzed
    /// into terms first. The default.
    Cosine,
    /// sift3 string distance over raw text, negated so higher is better.
    EditDistance,
    /// Caller-supplied scorer; receives the fetched content and the raw
    /// query, returns a score where higher is better.
    Custom(Box<dyn Fn(&FetchedContent, &str) -> f64 + Send + Sync>),
}

impl RankAlgorithm {
    pub fn score(&self, analyzer: &Analyzer, content: &FetchedContent, query: &str) -> f64 {
        match self {
            RankAlgorithm::Cosine => {
                let doc_terms = match content {
                    FetchedContent::Tokens(terms) => terms.clone(),
                    FetchedContent::Text(text) => analyzer.terms(text),
                };
                cosine(&doc_terms, &analyzer.terms(query))
            }
            RankAlgorithm::EditDistance => {
                let text = match content {
                    FetchedContent::Text(text) => text.clone(),
                    FetchedContent::Tokens(terms) => terms.join(" "),
                };
                -sift3(&text, query)
            }
            RankAlgorithm::Custom(scorer) => scorer(content, query),
        }
    }
}

/// Cosine similarity of two term lists over their term-frequency vectors.
/// Returns 0 when either side is empty.
pub fn cosine(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let freq_a = frequencies(a);
    let freq_b = frequencies(b);

    let dot: f64 = freq_a
        .iter()
        .filter_map(|(term, fa)| freq_b.get(term).map(|fb| fa * fb))
        .sum();
    let norm_a: f64 = freq_a.values().map(|f| f * f).sum::<f64>().sqrt();
    let norm_b: f64 = freq_b.values().map(|f| f * f).sum::<f64>().sqrt();

    dot / (norm_a * norm_b)
}

fn frequencies(terms: &[String]) -> HashMap<&str, f64> {
    let mut freq = HashMap::new();
    for term in terms {
        *freq.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    freq
}

/// sift3 string distance: a fast longest-common-subsequence approximation
/// with a bounded resynchronization window.
pub fn sift3(a: &str, b: &str) -> f64 {
    const MAX_OFFSET: usize = 5;

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len() as f64;
    }
    if b.is_empty() {
        return a.len() as f64;
    }

    let mut c = 0;
    let mut offset_a = 0;
    let mut offset_b = 0;
    let mut lcs = 0usize;

    while c + offset_a < a.len() && c + offset_b < b.len() {
        if a[c + offset_a] == b[c + offset_b] {
            lcs += 1;
        } else {
            offset_a = 0;
            offset_b = 0;
            for i in 0..MAX_OFFSET {
                if c + i < a.len() && a[c + i] == b[c] {
                    offset_a = i;
                    break;
                }
                if c + i < b.len() && a[c] == b[c + i] {
                    offset_b = i;
                    break;
                }
            }
        }
        c += 1;
    }

    (a.len() + b.len()) as f64 / 2.0 - lcs as f64
}
