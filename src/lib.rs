pub mod analysis;
pub mod core;
pub mod index;
pub mod keys;
pub mod scoring;
pub mod search;
pub mod storage;

/*
┌──────────────────────────────────────────────────────────────────────┐
│                        INVIDX ARCHITECTURE                           │
└──────────────────────────────────────────────────────────────────────┘

  Engine (core/engine.rs)
    │  index / remove / search / statistics
    │
    ├──uses──> Analyzer (analysis)       text → normalized weighted tokens
    ├──uses──> KeySpaces (keys)          tuples ↔ ordered posting keys
    ├──uses──> DocumentLocks (core)      per-id FIFO mutual exclusion
    ├──uses──> RunningStats (core)       tokens-per-document aggregates
    ├──uses──> Indexer (index)           delete-then-insert posting batches
    ├──uses──> run_scan (search)         (facet, term) range scans + dedupe
    │            └──> PageCursor         resumable pagination, TTL-bound
    └──uses──> RankAlgorithm (scoring)   cosine / sift3 / custom

  Storage (storage/mod.rs): ordered KV collaborator trait,
    get / put / put_ttl / delete / write_batch / scan_keys
    MemoryStore (storage/memory.rs) is the embedded reference impl.

  Key families (all label/value segments joined by '/'):
    1. text/{id}                                     stored document
    2. facet/{f}/word/{w}/idf/{weight}/id/{id}       facet-scoped lookup
    3. word/{w}/idf/{weight}/id/{id}                 facet-agnostic lookup
    4. id/{id}/word/{w}/idf/{weight}/facet/{f}       reverse index (removal)

  Weights use an order-preserving f64 encoding, so lexicographic key
  order equals ascending numeric weight order under a range scan.
*/

pub use crate::analysis::token::{Content, Token};
pub use crate::core::config::{EngineOptions, SearchOptions};
pub use crate::core::engine::{Engine, Getter, SearchQuery};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::StatsSnapshot;
pub use crate::scoring::ranker::{FetchedContent, RankAlgorithm};
pub use crate::search::results::{DocMatches, SearchResults};
pub use crate::storage::memory::MemoryStore;
pub use crate::storage::{BatchOp, KeyRange, Storage, WriteBatch};
