//! API Handlers
//!
//! HTTP request handlers for each lookup service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::models::{
    validate_key, ClearResponse, DeleteResponse, EntryResponse, HealthResponse, PutResponse,
    StatsResponse,
};
use crate::storage::{FileStorage, InMemoryStorage, Storage};

/// Cache of upstream JSON documents keyed by their path segment.
pub type DocumentCache = Cache<String, Value>;

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so it is shared through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DocumentCache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: DocumentCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Values are fetched over HTTP from `upstream_url` and kept on disk when
    /// `storage_dir` is set, in memory otherwise.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher<String, Value>> = Arc::new(HttpFetcher::new(
            config.upstream_url.as_str(),
            config.fetch_timeout(),
        )?);

        let storage: Arc<dyn Storage<String, Value>> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::open(dir.clone()).await?),
            None => Arc::new(InMemoryStorage::new()),
        };

        let cache = Cache::builder(storage, fetcher)
            .policy(config.policy())
            .build()?;
        Ok(Self::new(cache))
    }
}

fn checked(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for GET /entries/:key
///
/// Returns the cached document, fetching it upstream when absent or stale.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    let key = checked(key)?;
    let value = state.cache.get(&key).await?;

    Ok(Json(EntryResponse::new(key, value)))
}

/// Handler for PUT /entries/:key
///
/// Primes the cache with the request body without fetching.
pub async fn put_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<PutResponse>> {
    let key = checked(key)?;
    state.cache.put(&key, value).await?;

    Ok(Json(PutResponse::new(key)))
}

/// Handler for DELETE /entries/:key
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let key = checked(key)?;
    state.cache.remove(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.cache.clear().await?;
    Ok(Json(ClearResponse::new()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    let policy = state.cache.policy();

    Json(StatsResponse::new(
        &stats,
        policy.time_to_idle.as_secs(),
        policy.time_to_live.as_secs(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
