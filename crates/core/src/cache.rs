//! Process-local key/value cache.
//!
//! `MemoryCache` is an explicit, cloneable handle over a shared concurrent map. Whoever composes
//! the system owns the handle and passes it to the services that need it; there is no global
//! instance.
//!
//! Entries carry a [`CachePriority`]. Nothing is ever evicted implicitly: [`MemoryCache::compact`]
//! is the only sweep and it skips entries pinned with [`CachePriority::NeverRemove`]. All services
//! in this crate pin their entries, so their data only leaves the cache through an explicit
//! remove.
//!
//! Individual calls are thread-safe. Multi-step updates on a single key must go through
//! [`MemoryCache::alter`], which runs under that key's shard lock.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePriority {
    #[default]
    Normal,
    /// Survives [`MemoryCache::compact`]; removed only explicitly.
    NeverRemove,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    pub priority: CachePriority,
}

impl CacheEntryOptions {
    pub fn pinned() -> Self {
        Self {
            priority: CachePriority::NeverRemove,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    options: CacheEntryOptions,
}

#[derive(Debug)]
pub struct MemoryCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
}

impl<V> Clone for MemoryCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }
}

impl<V: Clone> MemoryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value stored under `key`.
    pub fn try_get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` with default (evictable) options.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with(key, value, CacheEntryOptions::default());
    }

    pub fn set_with(&self, key: impl Into<String>, value: V, options: CacheEntryOptions) {
        self.entries
            .insert(key.into(), CacheEntry { value, options });
    }

    /// Removes `key`, returning the value it held.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Atomically replaces the value under `key` with `f(current)`.
    ///
    /// `f` receives the current value (if any). Returning `Some` stores the new value with
    /// `options`; returning `None` deletes the entry. The key's shard stays locked for the whole
    /// call, so `f` must not touch this cache.
    pub fn alter<F>(&self, key: impl Into<String>, options: CacheEntryOptions, f: F)
    where
        F: FnOnce(Option<V>) -> Option<V>,
    {
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().value.clone();
                match f(Some(current)) {
                    Some(value) => {
                        *occupied.get_mut() = CacheEntry { value, options };
                    }
                    None => {
                        occupied.remove();
                    }
                }
            }
            Entry::Vacant(vacant) => {
                if let Some(value) = f(None) {
                    vacant.insert(CacheEntry { value, options });
                }
            }
        }
    }

    /// Drops every entry that is not pinned, returning how many were removed.
    pub fn compact(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.options.priority == CachePriority::NeverRemove);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_get_remove() {
        let cache: MemoryCache<String> = MemoryCache::new();
        assert!(cache.try_get("a").is_none());

        cache.set("a", "one".to_string());
        assert_eq!(cache.try_get("a").as_deref(), Some("one"));
        assert!(cache.contains_key("a"));

        assert_eq!(cache.remove("a").as_deref(), Some("one"));
        assert!(cache.try_get("a").is_none());
        assert!(cache.remove("a").is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        let other = cache.clone();
        other.set("k", 7);
        assert_eq!(cache.try_get("k"), Some(7));
    }

    #[test]
    fn test_compact_keeps_pinned_entries() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        cache.set("loose", 1);
        cache.set_with("pinned", 2, CacheEntryOptions::pinned());

        assert_eq!(cache.compact(), 1);
        assert!(cache.try_get("loose").is_none());
        assert_eq!(cache.try_get("pinned"), Some(2));
    }

    #[test]
    fn test_alter_inserts_updates_and_deletes() {
        let cache: MemoryCache<Vec<u32>> = MemoryCache::new();
        let pinned = CacheEntryOptions::pinned();

        cache.alter("k", pinned, |current| {
            assert!(current.is_none());
            Some(vec![1])
        });
        cache.alter("k", pinned, |current| {
            let mut list = current.unwrap_or_default();
            list.push(2);
            Some(list)
        });
        assert_eq!(cache.try_get("k"), Some(vec![1, 2]));

        cache.alter("k", pinned, |_| None);
        assert!(cache.try_get("k").is_none());

        // Returning None for a vacant key leaves it vacant.
        cache.alter("missing", pinned, |_| None);
        assert!(!cache.contains_key("missing"));
    }

    #[test]
    fn test_alter_does_not_lose_concurrent_updates() {
        let cache: MemoryCache<Vec<usize>> = MemoryCache::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for j in 0..50 {
                        cache.alter("registry", CacheEntryOptions::pinned(), |current| {
                            let mut list = current.unwrap_or_default();
                            list.push(i * 1000 + j);
                            Some(list)
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.try_get("registry").unwrap().len(), 400);
    }
}
