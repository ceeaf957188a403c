//! Eviction List Module
//!
//! Arena-backed doubly linked list ordering bindings by eviction priority.
//!
//! Slots 0 and 1 are permanent sentinels. The node after the head sentinel
//! is the next eviction candidate, the node before the tail sentinel is the
//! most favored one.

// == Constants ==
const HEAD: usize = 0;
const TAIL: usize = 1;

// == Node Handle ==
/// Stable handle to a node in the eviction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

// == Entry ==
/// A stored binding. `size` is its cost against the cache capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Vec<u8>,
    pub size: usize,
}

impl Entry {
    /// Creates an entry costed at `key.len() + value.len()` bytes.
    pub fn new(key: String, value: Vec<u8>) -> Self {
        let size = binding_size(&key, &value);
        Self { key, value, size }
    }
}

/// Returns the number of bytes a binding counts against capacity.
pub fn binding_size(key: &str, value: &[u8]) -> usize {
    key.len() + value.len()
}

#[derive(Debug)]
struct Node {
    prev: usize,
    next: usize,
    /// None for sentinels and free slots
    entry: Option<Entry>,
}

impl Node {
    fn detached(entry: Option<Entry>) -> Self {
        Self {
            prev: HEAD,
            next: TAIL,
            entry,
        }
    }
}

// == Eviction List ==
#[derive(Debug)]
pub struct EvictionList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    len: usize,
}

impl EvictionList {
    // == Constructor ==
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(None), Node::detached(None)],
            free: Vec::new(),
            len: 0,
        }
    }

    // == Insert At Tail ==
    /// Links a new node just before the tail sentinel and returns its handle.
    pub fn insert_at_tail(&mut self, entry: Entry) -> NodeId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].entry = Some(entry);
                idx
            }
            None => {
                self.nodes.push(Node::detached(Some(entry)));
                self.nodes.len() - 1
            }
        };
        self.link_before_tail(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Remove ==
    /// Unlinks a node wherever it sits and hands back its entry.
    ///
    /// Returns None for sentinels and handles that are no longer live.
    pub fn remove(&mut self, id: NodeId) -> Option<Entry> {
        if !self.is_live(id) {
            return None;
        }
        self.unlink(id.0);
        self.free.push(id.0);
        self.len -= 1;
        self.nodes[id.0].entry.take()
    }

    // == Move To Tail ==
    /// Repositions a live node just before the tail sentinel.
    pub fn move_to_tail(&mut self, id: NodeId) {
        if !self.is_live(id) || self.nodes[TAIL].prev == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_before_tail(id.0);
    }

    // == Navigation ==
    /// Returns the next eviction candidate.
    pub fn front(&self) -> Option<NodeId> {
        self.data_node(self.nodes[HEAD].next)
    }

    /// Returns the node after `id` in eviction order.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_live(id) {
            return None;
        }
        self.data_node(self.nodes[id.0].next)
    }

    // == Entry Access ==
    pub fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    pub fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
        self.nodes.get_mut(id.0).and_then(|node| node.entry.as_mut())
    }

    /// Iterates entries from the head (next evicted) to the tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.front(),
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Internal Helpers ==
    fn is_live(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    fn data_node(&self, idx: usize) -> Option<NodeId> {
        if idx == TAIL || idx == HEAD {
            None
        } else {
            Some(NodeId(idx))
        }
    }

    fn link_before_tail(&mut self, idx: usize) {
        let last = self.nodes[TAIL].prev;
        self.nodes[idx].prev = last;
        self.nodes[idx].next = TAIL;
        self.nodes[last].next = idx;
        self.nodes[TAIL].prev = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}

impl Default for EvictionList {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
pub struct Iter<'a> {
    list: &'a EvictionList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.list.next(id);
        self.list.entry(id)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str) -> Entry {
        Entry::new(key.to_string(), key.as_bytes().to_vec())
    }

    fn keys(list: &EvictionList) -> Vec<&str> {
        list.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_list_new() {
        let list = EvictionList::new();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_entry_size() {
        let e = Entry::new("ab".to_string(), b"cde".to_vec());
        assert_eq!(e.size, 5);
    }

    #[test]
    fn test_insert_at_tail_order() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));
        list.insert_at_tail(entry("b"));
        list.insert_at_tail(entry("c"));

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(a));
        assert_eq!(keys(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut list = EvictionList::new();
        list.insert_at_tail(entry("a"));
        let b = list.insert_at_tail(entry("b"));
        list.insert_at_tail(entry("c"));

        let removed = list.remove(b).unwrap();
        assert_eq!(removed.key, "b");
        assert_eq!(keys(&list), vec!["a", "c"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));

        assert!(list.remove(a).is_some());
        assert!(list.remove(a).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));
        list.insert_at_tail(entry("b"));
        list.remove(a);

        let c = list.insert_at_tail(entry("c"));
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["b", "c"]);
    }

    #[test]
    fn test_move_to_tail() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));
        list.insert_at_tail(entry("b"));
        let c = list.insert_at_tail(entry("c"));

        list.move_to_tail(a);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        // Already at the tail
        list.move_to_tail(a);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);

        list.move_to_tail(c);
        assert_eq!(keys(&list), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_next_walks_to_end() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));
        let b = list.insert_at_tail(entry("b"));

        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.next(b), None);
    }

    #[test]
    fn test_sentinel_handles_are_rejected() {
        let mut list = EvictionList::new();
        list.insert_at_tail(entry("a"));

        assert!(list.remove(NodeId(HEAD)).is_none());
        assert!(list.remove(NodeId(TAIL)).is_none());
        assert!(list.entry(NodeId(HEAD)).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_entry_mut_updates_in_place() {
        let mut list = EvictionList::new();
        let a = list.insert_at_tail(entry("a"));
        list.insert_at_tail(entry("b"));

        if let Some(e) = list.entry_mut(a) {
            e.value = b"changed".to_vec();
        }
        assert_eq!(list.entry(a).unwrap().value, b"changed".to_vec());
        assert_eq!(keys(&list), vec!["a", "b"]);
    }
}
