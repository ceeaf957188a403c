//! Cache Contract Module
//!
//! The operations shared by every eviction policy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::CacheStats;

// == Eviction Policy ==
/// Rule deciding eviction order and whether lookups or updates reposition
/// a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used bindings go first
    #[default]
    Lru,
    /// Oldest inserted bindings go first
    Fifo,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::Fifo => write!(f, "fifo"),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "fifo" => Ok(EvictionPolicy::Fifo),
            other => Err(format!("Unknown eviction policy: {}", other)),
        }
    }
}

// == Cache Trait ==
/// A byte-budgeted key/value cache.
///
/// A binding costs `key.len() + value.len()` bytes against `max_storage()`.
/// Implementations are not synchronized; wrap them in a lock to share them.
pub trait Cache {
    /// Returns the capacity in bytes.
    fn max_storage(&self) -> usize;

    /// Returns the number of unused bytes.
    fn remaining_storage(&self) -> usize;

    /// Returns the number of live bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a key, counting a hit or a miss.
    fn get(&mut self, key: &str) -> Option<&[u8]>;

    /// Binds `value` to `key`, evicting other bindings to make room.
    ///
    /// Returns false, leaving the cache untouched, when the binding alone
    /// exceeds the capacity.
    fn set(&mut self, key: &str, value: Vec<u8>) -> bool;

    /// Removes a binding and returns its value. Does not affect stats.
    fn remove(&mut self, key: &str) -> Option<Vec<u8>>;

    /// Returns a snapshot of the hit, miss and eviction counters.
    fn stats(&self) -> CacheStats;

    /// Returns the bound keys, next eviction candidate first.
    fn keys(&self) -> Vec<String>;

    fn policy(&self) -> EvictionPolicy;
}
