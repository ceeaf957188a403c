//! Binding Store Module
//!
//! Couples the key index with the eviction list and byte accounting, so the
//! engines can only mutate the map and the list together.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::list::{binding_size, Entry, EvictionList, NodeId};
use crate::cache::CacheStats;

// == Store ==
/// Key index, eviction order and capacity accounting for one cache.
#[derive(Debug)]
pub(crate) struct Store {
    /// Key to node handle
    bindings: HashMap<String, NodeId>,
    /// Nodes in eviction order
    list: EvictionList,
    /// Performance statistics
    stats: CacheStats,
    /// Capacity in bytes
    limit: usize,
    /// Sum of live binding sizes
    current_size: usize,
}

impl Store {
    // == Constructor ==
    pub fn new(limit: usize) -> Self {
        Self {
            bindings: HashMap::new(),
            list: EvictionList::new(),
            stats: CacheStats::new(),
            limit,
            current_size: 0,
        }
    }

    // == Accounting ==
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.current_size
    }

    #[cfg(test)]
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.bindings.len(), self.list.len());
        self.bindings.len()
    }

    /// Returns false, and logs, when a binding can never fit.
    pub fn admits(&self, key: &str, value: &[u8]) -> bool {
        let size = binding_size(key, value);
        if size > self.limit {
            debug!(
                "Rejected binding '{}': {} bytes exceeds capacity of {} bytes",
                key, size, self.limit
            );
            return false;
        }
        true
    }

    // == Lookup ==
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.bindings.get(key).copied()
    }

    pub fn value(&self, id: NodeId) -> Option<&[u8]> {
        self.list.entry(id).map(|entry| entry.value.as_slice())
    }

    // == Insert ==
    /// Links a new binding at the tail. The key must not be bound already.
    pub fn insert(&mut self, key: &str, value: Vec<u8>) -> NodeId {
        let entry = Entry::new(key.to_string(), value);
        self.current_size += entry.size;
        let id = self.list.insert_at_tail(entry);
        self.bindings.insert(key.to_string(), id);
        id
    }

    // == Update In Place ==
    /// Replaces a binding's value without changing its position.
    pub fn update_in_place(&mut self, id: NodeId, value: Vec<u8>) {
        if let Some(entry) = self.list.entry_mut(id) {
            let new_size = binding_size(&entry.key, &value);
            self.current_size = self.current_size - entry.size + new_size;
            entry.size = new_size;
            entry.value = value;
        }
    }

    // == Touch ==
    /// Marks a binding as most favored.
    pub fn touch(&mut self, id: NodeId) {
        self.list.move_to_tail(id);
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let id = self.lookup(key)?;
        self.remove_node(id)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Entry> {
        let entry = self.list.remove(id)?;
        self.bindings.remove(&entry.key);
        self.current_size -= entry.size;
        Some(entry)
    }

    // == Evict Overflow ==
    /// Evicts from the head until the store fits its limit again.
    ///
    /// `protected` is skipped so a binding never evicts itself. Returns the
    /// number of bindings evicted.
    pub fn evict_overflow(&mut self, protected: NodeId) -> usize {
        let mut evicted = 0;
        while self.current_size > self.limit {
            let victim = match self.list.front() {
                Some(id) if id == protected => self.list.next(id),
                other => other,
            };
            let Some(entry) = victim.and_then(|id| self.remove_node(id)) else {
                break;
            };
            self.stats.record_eviction();
            debug!("Evicted key '{}' ({} bytes)", entry.key, entry.size);
            evicted += 1;
        }
        evicted
    }

    // == Stats ==
    pub fn record_hit(&mut self) {
        self.stats.record_hit();
    }

    pub fn record_miss(&mut self) {
        self.stats.record_miss();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // == Keys ==
    /// Keys from the next eviction candidate to the most favored binding.
    pub fn keys(&self) -> Vec<String> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Sum of live entry sizes, walked from the list.
    #[cfg(test)]
    pub fn walked_size(&self) -> usize {
        self.list.iter().map(|entry| entry.size).sum()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = Store::new(10);
        assert_eq!(store.limit(), 10);
        assert_eq!(store.remaining(), 10);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_insert_and_lookup() {
        let mut store = Store::new(100);
        let id = store.insert("key", b"value".to_vec());

        assert_eq!(store.lookup("key"), Some(id));
        assert_eq!(store.value(id), Some(&b"value"[..]));
        assert_eq!(store.current_size(), 8);
        assert_eq!(store.remaining(), 92);
    }

    #[test]
    fn test_store_remove() {
        let mut store = Store::new(100);
        store.insert("key", b"value".to_vec());

        let entry = store.remove("key").unwrap();
        assert_eq!(entry.value, b"value".to_vec());
        assert_eq!(store.current_size(), 0);
        assert!(store.lookup("key").is_none());
        assert!(store.remove("key").is_none());
    }

    #[test]
    fn test_store_update_in_place_resizes() {
        let mut store = Store::new(100);
        let a = store.insert("a", b"1".to_vec());
        store.insert("b", b"2".to_vec());

        store.update_in_place(a, b"12345".to_vec());
        assert_eq!(store.current_size(), 8);
        assert_eq!(store.walked_size(), 8);
        assert_eq!(store.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_store_admits() {
        let store = Store::new(4);
        assert!(store.admits("ab", b"cd"));
        assert!(!store.admits("ab", b"cde"));
    }

    #[test]
    fn test_evict_overflow_from_head() {
        let mut store = Store::new(6);
        store.insert("a", b"1".to_vec());
        store.insert("b", b"2".to_vec());
        let c = store.insert("c", b"345".to_vec());

        let evicted = store.evict_overflow(c);
        assert_eq!(evicted, 1);
        assert_eq!(store.keys(), vec!["b", "c"]);
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.current_size(), 6);
    }

    #[test]
    fn test_evict_overflow_skips_protected_head() {
        let mut store = Store::new(6);
        let a = store.insert("a", b"1".to_vec());
        store.insert("b", b"2".to_vec());
        store.insert("c", b"3".to_vec());

        store.update_in_place(a, b"1234".to_vec());
        store.evict_overflow(a);

        assert_eq!(store.keys(), vec!["a"]);
        assert_eq!(store.current_size(), 5);
        assert_eq!(store.len(), 1);
    }
}
