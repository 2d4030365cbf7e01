use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(32).unwrap();

/// Bounded map whose entries are only served while younger than `stale_for`.
#[derive(Debug)]
pub(crate) struct StaleCache<K: Hash + Eq, V> {
    entries: LruCache<K, (Instant, V)>,
    stale_for: Duration,
}

impl<K: Hash + Eq, V: Clone> StaleCache<K, V> {
    pub(crate) fn new(stale_for: Duration) -> Self {
        Self {
            entries: LruCache::new(DEFAULT_CAPACITY),
            stale_for,
        }
    }

    pub(crate) fn insert(&mut self, key: K, value: V, now: Instant) {
        if self.stale_for.is_zero() {
            return;
        }
        self.entries.put(key, (now, value));
    }

    /// Return a fresh copy of the entry, evicting it if it went stale.
    pub(crate) fn get(&mut self, key: &K, now: Instant) -> Option<V> {
        let fresh = match self.entries.get(key) {
            Some((stored_at, _)) => now.saturating_duration_since(*stored_at) < self.stale_for,
            None => return None,
        };
        if !fresh {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|(_, value)| value.clone())
    }
}
