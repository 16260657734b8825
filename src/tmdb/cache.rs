use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use super::models::MovieDetail;

/// How many detail records are memoized before the least recently used one
/// is evicted.
pub const DETAILS_CACHE_CAPACITY: usize = 128;

/// Bounded memoization for `/movie/{id}` lookups. Entries only leave by LRU
/// eviction or an explicit `clear`; there is no time-based invalidation.
pub struct DetailsCache {
    entries: Mutex<LruCache<u64, MovieDetail>>,
}

impl DetailsCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a cached record, marking it most recently used.
    pub fn get(&self, id: u64) -> Option<MovieDetail> {
        self.entries.lock().unwrap().get(&id).cloned()
    }

    pub fn insert(&self, id: u64, detail: MovieDetail) {
        self.entries.lock().unwrap().put(id, detail);
    }

    /// Drop every entry. Used by tests to force a re-fetch.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DetailsCache {
    fn default() -> Self {
        Self::new(DETAILS_CACHE_CAPACITY)
    }
}
