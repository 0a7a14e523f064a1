// ── Generic reactive cache ──
//
// Client-side mirror of one backend collection. Refreshes replace the
// whole collection -- last response wins, no keyed merging -- which is
// exactly the overwrite semantics the backend contract promises and the
// reason this is simpler than a syncing store.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::EntityId;

/// A reactive, id-indexed cache for a single entity type.
///
/// Readers take cheap `Arc` snapshots or subscribe to a `watch` channel;
/// writers replace the entire collection. Snapshot order is the
/// backend's response order, not map order.
pub(crate) struct Cache<T: Send + Sync + 'static> {
    /// Secondary index for O(1) id lookups.
    by_id: DashMap<EntityId, Arc<T>>,

    /// Full snapshot in response order, rebuilt on every refresh.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,

    /// Bumped on every refresh, including no-op ones.
    version: watch::Sender<u64>,
}

impl<T: Send + Sync + 'static> Cache<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self {
            by_id: DashMap::new(),
            snapshot,
            version,
        }
    }

    /// Replace the entire collection with a fresh response.
    pub(crate) fn replace_all(&self, items: Vec<(EntityId, T)>) {
        let ordered: Vec<Arc<T>> = items
            .into_iter()
            .map(|(id, item)| {
                let item = Arc::new(item);
                self.by_id.insert(id, Arc::clone(&item));
                item
            })
            .collect();

        // Drop ids that were not in this response.
        self.by_id
            .retain(|_, existing| ordered.iter().any(|item| Arc::ptr_eq(item, existing)));

        self.snapshot.send_modify(|snap| *snap = Arc::new(ordered));
        self.version.send_modify(|v| *v += 1);
    }

    /// Look up one entity by id.
    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// The current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: &str, value: &str) -> (EntityId, String) {
        (EntityId::from(id), value.to_owned())
    }

    #[test]
    fn replace_all_installs_and_indexes() {
        let cache: Cache<String> = Cache::new();
        cache.replace_all(vec![entry("a", "alpha"), entry("b", "beta")]);

        assert_eq!(cache.len(), 2);
        assert_eq!(*cache.get(&EntityId::from("a")).unwrap(), "alpha");
        assert!(cache.get(&EntityId::from("zzz")).is_none());
    }

    #[test]
    fn snapshot_preserves_response_order() {
        let cache: Cache<String> = Cache::new();
        cache.replace_all(vec![entry("z", "last"), entry("a", "first")]);

        let snap = cache.snapshot();
        assert_eq!(*snap[0], "last");
        assert_eq!(*snap[1], "first");
    }

    #[test]
    fn last_response_wins() {
        let cache: Cache<String> = Cache::new();
        cache.replace_all(vec![entry("a", "v1"), entry("b", "v1")]);
        cache.replace_all(vec![entry("a", "v2")]);

        // "b" vanished with the newer response; "a" shows the new value.
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&EntityId::from("a")).unwrap(), "v2");
        assert!(cache.get(&EntityId::from("b")).is_none());
    }

    #[test]
    fn empty_response_clears_the_cache() {
        let cache: Cache<String> = Cache::new();
        cache.replace_all(vec![entry("a", "v1")]);
        cache.replace_all(Vec::new());

        assert!(cache.is_empty());
        assert!(cache.snapshot().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let cache: Cache<String> = Cache::new();
        let mut rx = cache.subscribe();

        cache.replace_all(vec![entry("a", "alpha")]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
