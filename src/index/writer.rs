use serde::{Deserialize, Serialize};

use crate::analysis::token::{Content, Token};
use crate::core::error::Result;
use crate::core::stats::{STATS_KEY, StatsRecord};
use crate::keys::codec::KeySpaces;
use crate::keys::number::encode_f64;
use crate::storage::{KeyRange, Storage, WriteBatch};

/// Key-family-1 record: the document content and its derived tokens, stored
/// only when no external content-fetch callback is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub text: Content,
    pub words: Vec<Token>,
}

/// Builds and commits posting batches for one document. All writes for an
/// `index` call land in a single atomic batch; removal commits its own.
pub struct Indexer<'a, S: Storage + ?Sized> {
    pub store: &'a S,
    pub keys: KeySpaces,
    /// Facet-scoped key family enabled.
    pub facets_enabled: bool,
    /// No external getter configured, so family 1 is ours to maintain.
    pub store_text: bool,
}

impl<'a, S: Storage + ?Sized> Indexer<'a, S> {
    /// Write every posting for `(id, words, facets)` plus the updated stats
    /// record as one atomic batch. Callers must hold the document lock and
    /// have removed any prior postings first.
    pub fn write_postings(
        &self,
        id: &str,
        content: &Content,
        words: &[Token],
        facets: &[String],
        stats: StatsRecord,
    ) -> Result<()> {
        let mut batch = WriteBatch::new();

        for token in words {
            let weight = encode_f64(token.idf);

            // Facet-agnostic lookup, once per token.
            batch.put(self.keys.word(&token.word, &weight, id), id);

            for facet in facets {
                // Reverse index, always: it is how removal finds postings.
                batch.put(self.keys.by_id(id, &token.word, &weight, facet), id);

                if self.facets_enabled && !facet.is_empty() {
                    batch.put(self.keys.facet(facet, &token.word, &weight, id), id);
                }
            }
        }

        if self.store_text {
            let record = StoredDocument {
                text: content.clone(),
                words: words.to_vec(),
            };
            batch.put(self.keys.text(id), serde_json::to_string(&record)?);
        }

        batch.put(STATS_KEY, serde_json::to_string(&stats)?);

        self.store.write_batch(batch)
    }

    /// Delete every posting for `id` across all key families, discovered by
    /// a prefix scan of the reverse index, as one atomic batch. A document
    /// with no postings is a no-op success.
    pub fn remove(&self, id: &str) -> Result<()> {
        let (start, end) = self.keys.by_id_range(id);
        let mut batch = WriteBatch::new();

        for key in self.store.scan_keys(KeyRange {
            start,
            end,
            limit: None,
        }) {
            let key = key?;
            let parsed = crate::keys::codec::parse_key(&key);
            let word = parsed.word.as_deref().unwrap_or_default();
            let weight = parsed.idf.as_deref().unwrap_or_default();
            let facet = parsed.facet.as_deref().unwrap_or_default();

            batch.delete(key);
            batch.delete(self.keys.word(word, weight, id));
            if self.store_text {
                batch.delete(self.keys.text(id));
            }
            if self.facets_enabled && !facet.is_empty() {
                batch.delete(self.keys.facet(facet, word, weight, id));
            }
        }

        self.store.write_batch(batch)
    }
}
