//! Person lookup cache used while resolving credits.
//!
//! The same person is credited across many movies, so resolving every
//! credit against the backing person source repeats lookups. `PersonCache`
//! memoizes them with a bounded LRU: it is an explicit value owned by the
//! ingestion caller, never process-wide state, and entries beyond the
//! capacity are evicted least-recently-used first.

use crate::types::PersonRef;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::debug;

/// Default number of people kept in a cache
pub const DEFAULT_PERSON_CACHE_CAPACITY: usize = 1024;

/// Backing lookup a cache falls through to on a miss
pub trait PersonSource {
    fn fetch_person(&self, id: &str) -> Option<PersonRef>;
}

impl PersonSource for HashMap<String, PersonRef> {
    fn fetch_person(&self, id: &str) -> Option<PersonRef> {
        self.get(id).cloned()
    }
}

/// Bounded memo of resolved people, keyed by person ID
pub struct PersonCache {
    entries: LruCache<String, PersonRef>,
    hits: u64,
    misses: u64,
}

impl PersonCache {
    /// Create a cache holding at most `capacity` people (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Resolve a person, consulting `source` only on a miss.
    ///
    /// Misses that the source cannot answer are not cached, so a later
    /// call against a richer source can still succeed.
    pub fn resolve(&mut self, id: &str, source: &dyn PersonSource) -> Option<PersonRef> {
        if let Some(person) = self.entries.get(id) {
            self.hits += 1;
            return Some(person.clone());
        }
        self.misses += 1;
        let person = source.fetch_person(id)?;
        self.entries.put(id.to_string(), person.clone());
        Some(person)
    }

    /// Drop every cached person and reset counters
    pub fn clear(&mut self) {
        debug!(
            "Clearing person cache ({} entries, {} hits, {} misses)",
            self.entries.len(),
            self.hits,
            self.misses
        );
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// (hits, misses) since creation or the last `clear`
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for PersonCache {
    fn default() -> Self {
        Self::new(DEFAULT_PERSON_CACHE_CAPACITY)
    }
}
