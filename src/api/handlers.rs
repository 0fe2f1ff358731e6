//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheOptions, RefCountedCache, Release, ReleaseError};
use crate::error::{CacheError, Result};
use crate::keys::derive_key;
use crate::models::{
    DeleteResponse, DeriveKeyRequest, EntriesResponse, EntryItem, EvictResponse, GetResponse,
    HasResponse, HealthResponse, KeyResponse, RefCountResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Release capability for the service's opaque string handles.
///
/// The service owns no real external resource, so releasing is logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRelease;

impl Release<String> for LogRelease {
    fn release(&mut self, value: &String) -> std::result::Result<(), ReleaseError> {
        info!(handle = %value, "Released cached handle");
        Ok(())
    }
}

/// The cache instance hosted by the service.
pub type ServiceCache = RefCountedCache<String, String, LogRelease>;

/// Application state shared across all handlers.
///
/// The cache is unsynchronized, so it lives behind `Arc<RwLock<>>`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<ServiceCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: ServiceCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a fresh cache with the given options.
    pub fn with_options(options: CacheOptions) -> Self {
        Self::new(RefCountedCache::with_release(options, LogRelease))
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::with_options(config.cache_options())
    }
}

/// Handler for PUT /set
///
/// Stores a value with a zero reference count and optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a read may expire the entry
    let mut cache = state.cache.write().await;
    let value = cache
        .get(key.as_str())
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let mut cache = state.cache.write().await;
    let present = cache.has(key.as_str());

    Json(HasResponse { key, present })
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.remove(key.as_str()) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /ref/:key/increment
pub async fn increment_ref_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RefCountResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.increment_ref(key.as_str()) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(RefCountResponse {
        ref_count: cache.ref_count(key.as_str()),
        released: false,
        key,
    }))
}

/// Handler for POST /ref/:key/decrement
pub async fn decrement_ref_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RefCountResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.has(key.as_str()) {
        return Err(CacheError::NotFound(key));
    }

    let released = cache.decrement_ref(key.as_str());

    Ok(Json(RefCountResponse {
        ref_count: cache.ref_count(key.as_str()),
        released,
        key,
    }))
}

/// Handler for GET /ref/:key
///
/// Absent keys report a count of zero.
pub async fn ref_count_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<RefCountResponse> {
    let cache = state.cache.read().await;

    Json(RefCountResponse {
        ref_count: cache.ref_count(key.as_str()),
        released: false,
        key,
    })
}

/// Handler for POST /evict
pub async fn evict_handler(State(state): State<AppState>) -> Json<EvictResponse> {
    let mut cache = state.cache.write().await;
    let evicted = cache.evict_all();
    info!("Evicted {} entries on request", evicted);

    Json(EvictResponse { evicted })
}

/// Handler for GET /entries
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let cache = state.cache.read().await;
    let entries = cache
        .entries()
        .map(|(key, value)| EntryItem {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();

    Json(EntriesResponse::new(entries))
}

/// Handler for POST /key
pub async fn derive_key_handler(Json(req): Json<DeriveKeyRequest>) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    Ok(Json(KeyResponse {
        key: derive_key(&req.ids),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;

    Json(StatsResponse::new(
        cache.stats(),
        cache.policy(),
        cache.max_size(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
