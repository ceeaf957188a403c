//! Byte Cache - A byte-budgeted in-memory cache
//!
//! Provides LRU and FIFO cache engines that charge each binding
//! `key.len() + value.len()` bytes against a fixed capacity, plus a small
//! HTTP server exposing one engine.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, CacheStats, EvictionPolicy, FifoCache, LruCache};
pub use config::Config;
