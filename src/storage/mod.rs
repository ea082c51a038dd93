pub mod memory;

use std::time::Duration;

use crate::core::error::Result;

/// Byte-lexicographic key interval handed to a range scan.
#[derive(Debug, Clone)]
pub struct KeyRange {
    /// Inclusive lower bound.
    pub start: String,
    /// Exclusive upper bound.
    pub end: String,
    /// Maximum number of keys the scan may deliver.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub enum BatchOp {
    Put { key: String, value: String },
    Delete { key: String },
}

/// Staged multi-operation write, committed atomically by
/// [`Storage::write_batch`].
#[derive(Debug, Default)]
pub struct WriteBatch {
    pub ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ops.push(BatchOp::Put {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.ops.push(BatchOp::Delete { key: key.into() });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Ordered key-value collaborator. The engine owns key construction and
/// batching; the store owns durability and ordering.
///
/// `scan_keys` must deliver keys in ascending byte order, lazily and
/// forward-only; dropping the iterator cancels the scan.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Write an entry that vanishes `ttl` after the write.
    fn put_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;

    /// Commit every staged operation or none of them.
    fn write_batch(&self, batch: WriteBatch) -> Result<()>;

    fn scan_keys(&self, range: KeyRange) -> Box<dyn Iterator<Item = Result<String>> + '_>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn put_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).put_ttl(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        (**self).write_batch(batch)
    }

    fn scan_keys(&self, range: KeyRange) -> Box<dyn Iterator<Item = Result<String>> + '_> {
        (**self).scan_keys(range)
    }
}
