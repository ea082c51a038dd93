use std::time::Duration;

use crate::scoring::ranker::RankAlgorithm;

/// Engine-level options, fixed at construction.
pub struct EngineOptions {
    /// Embed per-document term weights in posting keys. When disabled the
    /// weight segment is omitted from every key family and range scans no
    /// longer return postings in weight order.
    pub idf: bool,
    /// Porter-stem tokens during analysis.
    pub stem: bool,
    /// Reorder search candidates by similarity to the query. When disabled
    /// results come back in collection order.
    pub rank: bool,
    pub rank_algorithm: RankAlgorithm,
    /// Maintain the facet-scoped key family. When disabled every search is
    /// facet-agnostic.
    pub facets: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            idf: true,
            stem: true,
            rank: true,
            rank_algorithm: RankAlgorithm::Cosine,
            facets: true,
        }
    }
}

/// Per-search options.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum distinct documents per result page.
    pub limit: usize,
    /// Pagination cursor lifetime.
    pub ttl: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 100,
            ttl: Duration::from_millis(1000 * 60 * 60),
        }
    }
}
