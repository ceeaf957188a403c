//! Cache Module
//!
//! Provides byte-budgeted in-memory caching with LRU and FIFO eviction.

mod fifo;
mod list;
mod lru;
mod stats;
mod store;
mod traits;


// Re-export public types
pub use fifo::FifoCache;
pub use list::binding_size;
pub use lru::LruCache;
pub use stats::CacheStats;
pub use traits::{Cache, EvictionPolicy};

// == Factory ==
/// Creates an engine for `policy` holding at most `limit` bytes of bindings.
pub fn new_cache(policy: EvictionPolicy, limit: usize) -> Box<dyn Cache + Send> {
    match policy {
        EvictionPolicy::Lru => Box::new(LruCache::new(limit)),
        EvictionPolicy::Fifo => Box::new(FifoCache::new(limit)),
    }
}
