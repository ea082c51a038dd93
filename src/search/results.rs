use std::collections::HashMap;

/// Per-document view of which posting weights matched the query. The
/// collective weight is kept for diagnostics and assertions; it never
/// influences the ranked order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocMatches {
    /// Matched posting weights in ascending order.
    pub weights: Vec<f64>,
    /// Sum of the matched weights.
    pub collective_weight: f64,
}

/// One page of search results.
#[derive(Debug)]
pub struct SearchResults {
    /// Distinct document ids for this page, ranked by the configured
    /// similarity algorithm (collection order when ranking is disabled).
    pub ids: Vec<String>,
    /// Token that resumes this search where the page stopped. Expires after
    /// the configured TTL.
    pub token: String,
    /// Match diagnostics per document id on this page.
    pub matches: HashMap<String, DocMatches>,
}
