//! LRU Cache Module
//!
//! Byte-budgeted cache evicting the least recently used binding first.

use crate::cache::store::Store;
use crate::cache::{Cache, CacheStats, EvictionPolicy};

// == LRU Cache ==
/// Cache with least-recently-used eviction.
///
/// Both a lookup hit and an update move the binding to the most recently
/// used end.
#[derive(Debug)]
pub struct LruCache {
    store: Store,
}

impl LruCache {
    // == Constructor ==
    /// Creates an LRU cache able to hold `limit` bytes of bindings.
    pub fn new(limit: usize) -> Self {
        Self {
            store: Store::new(limit),
        }
    }
}

impl Cache for LruCache {
    fn max_storage(&self) -> usize {
        self.store.limit()
    }

    fn remaining_storage(&self) -> usize {
        self.store.remaining()
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    // == Get ==
    /// A hit counts as a use of the binding.
    fn get(&mut self, key: &str) -> Option<&[u8]> {
        match self.store.lookup(key) {
            Some(id) => {
                self.store.record_hit();
                self.store.touch(id);
                self.store.value(id)
            }
            None => {
                self.store.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// An existing binding is replaced by a fresh one at the most recently
    /// used end, exactly like a new insert.
    fn set(&mut self, key: &str, value: Vec<u8>) -> bool {
        if !self.store.admits(key, &value) {
            return false;
        }

        if let Some(old) = self.store.lookup(key) {
            self.store.remove_node(old);
        }
        let id = self.store.insert(key, value);
        self.store.evict_overflow(id);
        true
    }

    // == Remove ==
    fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.store.remove(key).map(|entry| entry.value)
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }
}
