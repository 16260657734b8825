use std::collections::HashSet;

use dashmap::DashMap;

/// In-memory favorites, one set per session token. Lives for the process;
/// nothing is persisted.
pub struct FavoritesStore {
    sets: DashMap<String, HashSet<u64>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self {
            sets: DashMap::new(),
        }
    }

    /// Flip membership of a movie in one session's set. Returns true when
    /// the movie was added, false when it was removed. The entry handle
    /// keeps the flip atomic per session.
    pub fn toggle(&self, session: &str, movie_id: u64) -> bool {
        let mut set = self
            .sets
            .entry(session.to_string())
            .or_insert_with(HashSet::new);
        if set.insert(movie_id) {
            true
        } else {
            set.remove(&movie_id);
            false
        }
    }

    pub fn contains(&self, session: &str, movie_id: u64) -> bool {
        self.sets
            .get(session)
            .map(|set| set.contains(&movie_id))
            .unwrap_or(false)
    }

    /// The session's favorites in ascending ID order.
    pub fn ids(&self, session: &str) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .sets
            .get(session)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }
}
