//! Per-flat mutual exclusion for read-modify-write cycles.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// Async mutex per flat id, created on first use and removed once no
/// operation holds or waits for it.
///
/// When disabled, `acquire` returns immediately without a guard and
/// concurrent operations on one flat may overwrite each other's changes.
#[derive(Debug, Default)]
pub struct FlatLocks {
    enabled: bool,
    locks: Arc<LockMap>,
}

/// Holds one flat's lock; dropping it releases the lock and prunes the
/// map entry when nobody else is queued on it.
#[derive(Debug)]
pub struct FlatGuard {
    flat_id: String,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for FlatGuard {
    fn drop(&mut self) {
        // Release first so our own Arc no longer counts.
        self.guard.take();
        self.locks
            .remove_if(&self.flat_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl FlatLocks {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::default(),
        }
    }

    /// Waits until no other operation holds `flat_id`.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn acquire(&self, flat_id: &str) -> Option<FlatGuard> {
        if !self.enabled {
            return None;
        }
        // Clone the Arc out so the map shard is not held across the await.
        let lock = self
            .locks
            .entry(flat_id.to_string())
            .or_default()
            .value()
            .clone();
        let guard = lock.lock_owned().await;
        Some(FlatGuard {
            flat_id: flat_id.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}
