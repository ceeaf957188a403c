//! FIFO Cache Module
//!
//! Byte-budgeted cache evicting the oldest inserted binding first.

use crate::cache::store::Store;
use crate::cache::{Cache, CacheStats, EvictionPolicy};

// == FIFO Cache ==
/// Cache with first-in-first-out eviction.
///
/// Lookups never reorder bindings, and updating an existing key keeps its
/// place in the insertion queue.
#[derive(Debug)]
pub struct FifoCache {
    store: Store,
}

impl FifoCache {
    // == Constructor ==
    /// Creates a FIFO cache able to hold `limit` bytes of bindings.
    pub fn new(limit: usize) -> Self {
        Self {
            store: Store::new(limit),
        }
    }
}

impl Cache for FifoCache {
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
    fn get(&mut self, key: &str) -> Option<&[u8]> {
        match self.store.lookup(key) {
            Some(id) => {
                self.store.record_hit();
                self.store.value(id)
            }
            None => {
                self.store.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Updates are applied in place. A grown binding still evicts from the
    /// oldest end, which may remove bindings younger than itself.
    fn set(&mut self, key: &str, value: Vec<u8>) -> bool {
        if !self.store.admits(key, &value) {
            return false;
        }

        let id = match self.store.lookup(key) {
            Some(id) => {
                self.store.update_in_place(id, value);
                id
            }
            None => self.store.insert(key, value),
        };
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
        EvictionPolicy::Fifo
    }
}
