use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Content;
use crate::core::config::{EngineOptions, SearchOptions};
use crate::core::error::{Error, Result};
use crate::core::lock::DocumentLocks;
use crate::core::stats::{RunningStats, STATS_KEY, StatsSnapshot};
use crate::index::writer::{Indexer, StoredDocument};
use crate::keys::codec::KeySpaces;
use crate::scoring::ranker::FetchedContent;
use crate::search::cursor::{self, PageCursor, ResumeRange};
use crate::search::results::{DocMatches, SearchResults};
use crate::search::scan::{self, ScanCollector};
use crate::storage::Storage;

/// Caller-supplied content fetch. When configured, the engine stops
/// persisting key family 1 and resolves ranking content through this instead.
pub type Getter = Box<dyn Fn(&str) -> Result<FetchedContent> + Send + Sync>;

/// A search request: query text plus an optional resumption token from a
/// previous page.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub resume: Option<String>,
}

impl SearchQuery {
    pub fn resumed(text: impl Into<String>, token: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            resume: Some(token.into()),
        }
    }
}

impl From<&str> for SearchQuery {
    fn from(text: &str) -> Self {
        SearchQuery {
            text: text.to_string(),
            resume: None,
        }
    }
}

impl From<String> for SearchQuery {
    fn from(text: String) -> Self {
        SearchQuery { text, resume: None }
    }
}

/// Inverted-index search engine over an ordered key-value store.
///
/// Owns key construction, posting layout, per-document locking, query
/// execution, pagination cursors, and ranking. The store owns everything
/// else.
pub struct Engine<S: Storage> {
    store: S,
    options: EngineOptions,
    keys: KeySpaces,
    analyzer: Analyzer,
    locks: DocumentLocks,
    stats: Mutex<RunningStats>,
    getter: Option<Getter>,
}

impl<S: Storage> Engine<S> {
    pub fn new(store: S, options: EngineOptions) -> Self {
        Self::build(store, options, None)
    }

    /// Construct with an external content-fetch callback. The engine will
    /// not persist stored-document records of its own.
    pub fn with_getter(store: S, options: EngineOptions, getter: Getter) -> Self {
        Self::build(store, options, Some(getter))
    }

    fn build(store: S, options: EngineOptions, getter: Option<Getter>) -> Self {
        let mut stats = RunningStats::new();
        // Best-effort seed: a missing or unreadable record starts from zero.
        if let Ok(Some(raw)) = store.get(STATS_KEY) {
            if let Ok(record) = serde_json::from_str(&raw) {
                stats.seed(record);
            }
        }

        let keys = KeySpaces::new(&options);
        Engine {
            store,
            keys,
            analyzer: Analyzer::new(options.stem),
            locks: DocumentLocks::new(),
            stats: Mutex::new(stats),
            getter,
            options,
        }
    }

    /// Index a document under `id`, replacing any previous postings.
    ///
    /// Always delete-then-insert: prior postings are removed in their own
    /// batch before the new postings (plus the updated stats record) commit
    /// in another, all while the document lock is held.
    pub fn index(&self, content: impl Into<Content>, id: &str, facets: &[&str]) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_argument("document id must not be empty"));
        }

        let content = content.into();
        let facets = normalize_facets(facets);
        let indexer = self.indexer();

        self.locks.with_lock(id, || {
            indexer.remove(id)?;

            let words = self.analyzer.analyze(&content, true, false);
            debug!(id, words = words.len(), facets = facets.len(), "indexing document");

            let record = {
                let mut stats = self.stats.lock();
                stats.record((words.len() * facets.len()) as f64);
                stats.record_for_storage()
            };

            indexer.write_postings(id, &content, &words, &facets, record)
        })
    }

    /// Remove every posting for `id`. Unknown ids are a no-op success.
    pub fn remove(&self, id: &str) -> Result<()> {
        debug!(id, "removing document");
        let indexer = self.indexer();
        self.locks.with_lock(id, || indexer.remove(id))
    }

    /// Execute a (possibly resumed) search over the given facets.
    pub fn search(
        &self,
        query: impl Into<SearchQuery>,
        facets: &[&str],
        options: &SearchOptions,
    ) -> Result<SearchResults> {
        let query = query.into();
        let facets = if self.options.facets {
            normalize_facets(facets)
        } else {
            vec![String::new()]
        };

        // Size each scan to the densest document ever indexed so one scan
        // page can hold all of its postings.
        let scan_limit = {
            let stats = self.stats.lock();
            let ceiling = (stats.max() * facets.len() as f64).ceil() as usize;
            if ceiling == 0 { options.limit } else { ceiling }
        };

        let (mut collector, mut ranges) = match &query.resume {
            Some(token) => {
                let raw = self
                    .store
                    .get(token)?
                    .ok_or_else(|| Error::not_found(format!("no such page: {}", token)))?;
                let page: PageCursor = serde_json::from_str(&raw)?;
                (ScanCollector::resumed(page.ids), page.ranges)
            }
            None => {
                let words = self.analyzer.terms(&query.text);
                let mut ranges = Vec::with_capacity(words.len() * facets.len());
                for facet in &facets {
                    for word in &words {
                        let prefix = self.keys.search_prefix(facet, word);
                        ranges.push(ResumeRange {
                            end: format!("{}{}", prefix, crate::keys::codec::RANGE_END),
                            start: prefix,
                            limit: scan_limit,
                            word: word.clone(),
                        });
                    }
                }
                (ScanCollector::default(), ranges)
            }
        };

        debug!(
            text = %query.text,
            resumed = query.resume.is_some(),
            scans = ranges.len(),
            "searching"
        );

        for range in &mut ranges {
            scan::run_scan(&self.store, range, &mut collector, options.limit)?;
        }

        // Ascending weight, stable: this is the order candidates first
        // appear in for ranking-disabled results.
        collector
            .matched
            .sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal));

        let mut matches: HashMap<String, DocMatches> = HashMap::new();
        let mut candidates: Vec<String> = Vec::new();
        for matched in &collector.matched {
            let entry = matches.entry(matched.id.clone()).or_insert_with(|| {
                candidates.push(matched.id.clone());
                DocMatches::default()
            });
            entry.weights.push(matched.weight);
            entry.collective_weight += matched.weight;
        }

        let ids = self.rank(&query.text, candidates)?;

        let token = cursor::new_token();
        let page = PageCursor {
            ids: collector.ids,
            ranges,
        };
        self.store
            .put_ttl(&token, &serde_json::to_string(&page)?, options.ttl)?;

        Ok(SearchResults { ids, token, matches })
    }

    /// Snapshot of the tokens-written-per-document statistics.
    pub fn statistics(&self) -> StatsSnapshot {
        self.stats.lock().snapshot()
    }

    /// Reorder candidates by similarity to the query; collection order when
    /// ranking is disabled. Ties keep encounter order.
    fn rank(&self, query: &str, candidates: Vec<String>) -> Result<Vec<String>> {
        if !self.options.rank || candidates.is_empty() {
            return Ok(candidates);
        }

        let mut scored: Vec<(String, f64)> = Vec::with_capacity(candidates.len());
        for id in candidates {
            let content = self.fetch(&id)?;
            let score = self.options.rank_algorithm.score(&self.analyzer, &content, query);
            scored.push((id, score));
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }

    fn fetch(&self, id: &str) -> Result<FetchedContent> {
        if let Some(getter) = &self.getter {
            return getter(id);
        }

        let raw = self
            .store
            .get(&self.keys.text(id))?
            .ok_or_else(|| Error::not_found(format!("no stored content for {}", id)))?;
        let record: StoredDocument = serde_json::from_str(&raw)?;
        Ok(FetchedContent::Tokens(
            record.words.into_iter().map(|t| t.word).collect(),
        ))
    }

    fn indexer(&self) -> Indexer<'_, S> {
        Indexer {
            store: &self.store,
            keys: self.keys,
            facets_enabled: self.options.facets,
            store_text: self.getter.is_none(),
        }
    }

    /// Alias for [`Engine::index`].
    pub fn put(&self, content: impl Into<Content>, id: &str, facets: &[&str]) -> Result<()> {
        self.index(content, id, facets)
    }

    /// Alias for [`Engine::remove`].
    pub fn del(&self, id: &str) -> Result<()> {
        self.remove(id)
    }

    /// Alias for [`Engine::search`].
    pub fn query(
        &self,
        query: impl Into<SearchQuery>,
        facets: &[&str],
        options: &SearchOptions,
    ) -> Result<SearchResults> {
        self.search(query, facets, options)
    }
}

fn normalize_facets(facets: &[&str]) -> Vec<String> {
    if facets.is_empty() {
        return vec![String::new()];
    }
    facets.iter().map(|facet| facet.to_lowercase()).collect()
}
