//! Idempotency cache for tool results.
//!
//! Keyed by [`CacheKey`] (tool name + canonical input). Each entry is a
//! once-cell: the first caller runs the executor, concurrent callers with
//! the same key await that single execution, and later callers read the
//! stored result. Error results are cached like successes.
//!
//! Entries never expire; the owner clears the cache at turn boundaries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use toolbatch_domain::{CacheKey, ExecutorResult};

/// Slot holding at most one result per key.
pub type CacheSlot = Arc<OnceCell<ExecutorResult>>;

#[derive(Debug, Default)]
pub struct IdempotencyCache {
    entries: Mutex<HashMap<CacheKey, CacheSlot>>,
}

impl IdempotencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed result for `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<ExecutorResult> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// The slot for `key`, created empty on first use.
    pub fn slot(&self, key: &CacheKey) -> CacheSlot {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key.clone()).or_default())
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of completed entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_slot_runs_once() {
        let cache = IdempotencyCache::new();
        let key = CacheKey::new("read_file", &json!({"path": "a"}));
        let runs = AtomicUsize::new(0);

        for _ in 0..3 {
            let slot = cache.slot(&key);
            let result = slot
                .get_or_init(|| async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    ExecutorResult::success("content")
                })
                .await;
            assert_eq!(result.content, "content");
        }

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap().content, "content");
    }

    #[tokio::test]
    async fn test_pending_slot_is_not_a_hit() {
        let cache = IdempotencyCache::new();
        let key = CacheKey::new("read_file", &json!({"path": "a"}));
        let _slot = cache.slot(&key);
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear_drops_results() {
        let cache = IdempotencyCache::new();
        let key = CacheKey::new("read_file", &json!({"path": "a"}));
        cache
            .slot(&key)
            .get_or_init(|| async { ExecutorResult::error("boom") })
            .await;
        assert!(cache.get(&key).unwrap().is_error);

        cache.clear();
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }
}
