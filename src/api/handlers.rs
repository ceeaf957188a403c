//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{binding_size, new_cache, Cache};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, KeysResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// The engine is unsynchronized, so every handler goes through the mutex,
/// lookups included since they update counters and recency.
#[derive(Clone)]
pub struct AppState {
    /// Cache engine behind a lock
    pub cache: Arc<Mutex<Box<dyn Cache + Send>>>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(cache: Box<dyn Cache + Send>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(new_cache(config.policy, config.capacity))
    }
}

/// Handler for PUT /set
///
/// Binds a value to a key, evicting older bindings when needed.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let size = binding_size(&req.key, req.value.as_bytes());
    let mut cache = state.cache.lock().await;
    if !cache.set(&req.key, req.value.into_bytes()) {
        return Err(CacheError::BindingTooLarge {
            key: req.key,
            size,
            limit: cache.max_storage(),
        });
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.lock().await;
    match cache.remove(&key) {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    Json(StatsResponse::from_cache(&**cache))
}

/// Handler for GET /keys
///
/// Lists bound keys in eviction order.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.lock().await;
    Json(KeysResponse { keys: cache.keys() })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
