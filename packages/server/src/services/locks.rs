use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i32, Arc<Mutex<()>>>;

/// Per-document mutexes serializing replace and delete on the same id.
#[derive(Clone, Default)]
pub struct DocumentLocks {
    inner: Arc<LockMap>,
}

/// Held for as long as the caller owns the document.
pub struct DocumentGuard {
    id: i32,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl DocumentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, id: i32) -> DocumentGuard {
        let mutex = self.inner.entry(id).or_default().clone();
        let guard = mutex.lock_owned().await;
        DocumentGuard {
            id,
            guard: Some(guard),
            locks: self.inner.clone(),
        }
    }

    /// Number of ids with a live or contended lock.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Drop for DocumentGuard {
    fn drop(&mut self) {
        // Release first so the map holds the only reference when nobody waits.
        self.guard.take();
        self.locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
