use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::core::error::Result;
use crate::storage::{BatchOp, KeyRange, Storage, WriteBatch};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn live(&self, now: Instant) -> bool {
        self.expires_at.map(|at| now < at).unwrap_or(true)
    }
}

/// `BTreeMap`-backed ordered store with millisecond TTL support, enforced on
/// read. The reference implementation of [`Storage`] for embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of live entries; expired ones are not counted.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read();
        Ok(entries
            .get(key)
            .filter(|entry| entry.live(Instant::now()))
            .map(|entry| entry.value.clone()))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    fn put_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        // Single map lock for the whole batch: all ops land or, on an
        // earlier error path, none were staged here at all.
        let mut entries = self.entries.write();
        for op in batch.ops {
            match op {
                BatchOp::Put { key, value } => {
                    entries.insert(
                        key,
                        Entry {
                            value,
                            expires_at: None,
                        },
                    );
                }
                BatchOp::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn scan_keys(&self, range: KeyRange) -> Box<dyn Iterator<Item = Result<String>> + '_> {
        let now = Instant::now();
        let entries = self.entries.read();
        let limit = range.limit.unwrap_or(usize::MAX);

        let keys: Vec<String> = entries
            .range(range.start..range.end)
            .filter(|(_, entry)| entry.live(now))
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect();

        Box::new(keys.into_iter().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = MemoryStore::new();
        store.put("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn scan_is_ordered_and_bounded() {
        let store = MemoryStore::new();
        for key in ["b/2", "a/1", "b/1", "c/9", "b/3"] {
            store.put(key, key).unwrap();
        }

        let range = KeyRange {
            start: "b/".to_string(),
            end: "b/\u{00ff}".to_string(),
            limit: Some(2),
        };
        let keys: Vec<String> = store.scan_keys(range).map(|k| k.unwrap()).collect();
        assert_eq!(keys, ["b/1", "b/2"]);
    }

    #[test]
    fn batch_applies_all_ops() {
        let store = MemoryStore::new();
        store.put("gone", "x").unwrap();

        let mut batch = WriteBatch::new();
        batch.put("a", "1");
        batch.put("b", "2");
        batch.delete("gone");
        store.write_batch(batch).unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("gone").unwrap(), None);
    }

    #[test]
    fn ttl_entries_expire() {
        let store = MemoryStore::new();
        store.put_ttl("page", "cursor", Duration::from_millis(10)).unwrap();
        assert!(store.get("page").unwrap().is_some());
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(store.get("page").unwrap(), None);
    }
}
