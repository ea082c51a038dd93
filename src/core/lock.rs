use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{FairMutex, Mutex};

struct LockEntry {
    // Fair so queued same-id callers acquire in arrival order.
    mutex: FairMutex<()>,
    // Holders plus queued waiters. Only updated under the registry mutex,
    // which is what makes remove-on-zero safe against a concurrent acquire.
    refs: AtomicUsize,
}

/// Per-document-id mutual exclusion.
///
/// Entries are created on first use and dropped once the last holder or
/// waiter for an id releases, so the registry never grows with the id space.
/// There is no acquisition timeout; a critical section that never returns
/// starves later callers for that id.
#[derive(Default)]
pub struct DocumentLocks {
    registry: Mutex<HashMap<String, Arc<LockEntry>>>,
}

impl DocumentLocks {
    pub fn new() -> Self {
        DocumentLocks::default()
    }

    /// Run `f` while holding the exclusive lock for `id`. Concurrent calls
    /// for distinct ids proceed independently; same-id calls serialize in
    /// arrival order.
    pub fn with_lock<T>(&self, id: &str, f: impl FnOnce() -> T) -> T {
        let entry = {
            let mut registry = self.registry.lock();
            let entry = registry.entry(id.to_string()).or_insert_with(|| {
                Arc::new(LockEntry {
                    mutex: FairMutex::new(()),
                    refs: AtomicUsize::new(0),
                })
            });
            entry.refs.fetch_add(1, Ordering::Relaxed);
            entry.clone()
        };

        // Declared before the mutex guard so it runs after the unlock, and
        // runs even when `f` unwinds.
        let _release = ReleaseGuard {
            locks: self,
            id,
            entry: &entry,
        };
        let _guard = entry.mutex.lock();
        f()
    }

    #[cfg(test)]
    fn registry_len(&self) -> usize {
        self.registry.lock().len()
    }
}

struct ReleaseGuard<'a> {
    locks: &'a DocumentLocks,
    id: &'a str,
    entry: &'a Arc<LockEntry>,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        let mut registry = self.locks.registry.lock();
        if self.entry.refs.fetch_sub(1, Ordering::Relaxed) == 1 {
            registry.remove(self.id);
        }
    }
}
