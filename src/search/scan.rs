use crate::core::error::Result;
use crate::keys::codec;
use crate::search::cursor::ResumeRange;
use crate::storage::{KeyRange, Storage};

/// A posting key accepted by a scan, decoded.
#[derive(Debug, Clone)]
pub struct MatchedKey {
    pub id: String,
    pub word: String,
    pub weight: f64,
}

/// Accumulated state shared across every (facet, term) scan of one search
/// call: the global distinct-document set and the per-key match list.
#[derive(Debug, Default)]
pub struct ScanCollector {
    pub ids: Vec<String>,
    pub matched: Vec<MatchedKey>,
    /// Distinct documents collected by this call (excludes ids carried in
    /// from a resumed cursor).
    pub found: usize,
}

impl ScanCollector {
    pub fn resumed(ids: Vec<String>) -> Self {
        ScanCollector {
            ids,
            matched: Vec::new(),
            found: 0,
        }
    }

    fn seen(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }
}

/// Run one (facet, term) range scan, appending accepted documents to the
/// collector until `page_limit` distinct ids are held.
///
/// Streams keys in ascending order; stops at the page limit, at the first
/// key whose decoded term no longer has the queried term as a prefix, or at
/// stream end. On stop the range's `start` is rewritten to the exact key the
/// scan stopped at, making the range directly resumable. A stream error
/// aborts the scan and surfaces immediately; nothing staged is kept.
pub fn run_scan<S: Storage + ?Sized>(
    store: &S,
    range: &mut ResumeRange,
    collector: &mut ScanCollector,
    page_limit: usize,
) -> Result<()> {
    let request = KeyRange {
        start: range.start.clone(),
        end: range.end.clone(),
        limit: Some(range.limit),
    };

    let mut last_key: Option<String> = None;

    for key in store.scan_keys(request) {
        let key = key?;
        last_key = Some(key.clone());

        let parsed = codec::parse_key(&key);
        let weight = parsed.weight().unwrap_or(0.0);
        let (Some(word), Some(id)) = (parsed.word, parsed.id) else {
            break;
        };
        // Range scans run past the intended prefix at the end of the key
        // space; a non-matching term means the range is exhausted.
        if !word.starts_with(&range.word) {
            break;
        }
        if collector.seen(&id) {
            continue;
        }
        if collector.found >= page_limit {
            break;
        }

        collector.ids.push(id.clone());
        collector.matched.push(MatchedKey { id, word, weight });
        collector.found += 1;

        if collector.found >= page_limit {
            break;
        }
    }

    if let Some(last) = last_key {
        range.start = last;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn range(word: &str, limit: usize) -> ResumeRange {
        ResumeRange {
            start: format!("word/{}", word),
            end: format!("word/{}\u{00ff}", word),
            limit,
            word: word.to_string(),
        }
    }

    fn store_with(keys: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for key in keys {
            store.put(key, "x").unwrap();
        }
        store
    }

    #[test]
    fn collects_distinct_ids_in_key_order() {
        let store = store_with(&[
            "word/fox/idf/8000000000000000/id/d1",
            "word/fox/idf/8000000000000000/id/d2",
            "word/fox/idf/9000000000000000/id/d1",
        ]);

        let mut collector = ScanCollector::default();
        let mut range = range("fox", 10);
        run_scan(&store, &mut range, &mut collector, 10).unwrap();

        assert_eq!(collector.ids, ["d1", "d2"]);
        assert_eq!(collector.found, 2);
    }

    #[test]
    fn accepts_prefix_extensions_within_range() {
        let store = store_with(&[
            "word/fox/idf/8000000000000000/id/d1",
            "word/foxtrot/idf/8000000000000000/id/d2",
            "word/fur/idf/8000000000000000/id/d3",
        ]);

        let mut collector = ScanCollector::default();
        let mut range = range("fox", 10);
        run_scan(&store, &mut range, &mut collector, 10).unwrap();

        assert_eq!(collector.ids, ["d1", "d2"]);
    }

    #[test]
    fn page_limit_stops_the_scan_and_marks_resumption() {
        let store = store_with(&[
            "word/fox/idf/8000000000000000/id/d1",
            "word/fox/idf/8000000000000000/id/d2",
            "word/fox/idf/8000000000000000/id/d3",
        ]);

        let mut collector = ScanCollector::default();
        let mut range = range("fox", 10);
        run_scan(&store, &mut range, &mut collector, 2).unwrap();

        assert_eq!(collector.ids, ["d1", "d2"]);
        // Resumes at the key that hit the limit; its id is already seen so a
        // resumed scan moves straight past it.
        assert_eq!(range.start, "word/fox/idf/8000000000000000/id/d2");

        let mut resumed = ScanCollector::resumed(collector.ids.clone());
        run_scan(&store, &mut range, &mut resumed, 2).unwrap();
        assert_eq!(resumed.ids, ["d1", "d2", "d3"]);
        assert_eq!(resumed.found, 1);
    }

    #[test]
    fn empty_range_leaves_start_untouched() {
        let store = MemoryStore::new();
        let mut collector = ScanCollector::default();
        let mut range = range("fox", 10);
        run_scan(&store, &mut range, &mut collector, 10).unwrap();
        assert_eq!(range.start, "word/fox");
        assert!(collector.ids.is_empty());
    }
}
