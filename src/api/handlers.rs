//! API Handlers
//!
//! HTTP request handlers for each property cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::PropertyCache;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    validate_property_name, DeletePropertyResponse, HealthResponse, PropertyEntry,
    SetPropertyRequest, SetPropertyResponse, StatsResponse,
};
use crate::storage::{MemoryStore, PropertyStorage};
use crate::tasks::StalenessPoller;

/// Application state shared across all handlers.
///
/// Both components manage their own interior locking, so handlers clone
/// the Arcs and call straight through.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache fronting the property store
    pub cache: Arc<PropertyCache>,
    /// Poller whose refresh mark feeds the stats endpoint
    pub poller: Arc<StalenessPoller>,
}

impl AppState {
    /// Creates a new AppState from already-wired components.
    pub fn new(cache: Arc<PropertyCache>, poller: Arc<StalenessPoller>) -> Self {
        Self { cache, poller }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires an in-memory store behind the cache and poller. Polling is
    /// tied to the cache flag: with caching off there is nothing for a
    /// refresh run to invalidate.
    pub fn from_config(config: &Config) -> Self {
        let storage: Arc<dyn PropertyStorage> = Arc::new(MemoryStore::new());
        let cache = Arc::new(PropertyCache::with_enabled(
            storage.clone(),
            config.cache_enabled,
        ));
        let poller = Arc::new(StalenessPoller::new(
            cache.clone(),
            storage,
            config.cache_enabled,
        ));
        Self::new(cache, poller)
    }
}

/// Handler for GET /properties/:name
///
/// Reads one property through the cache. An unset property answers 404,
/// and the confirmed absence is cached so repeats skip the backend.
pub async fn get_property_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<PropertyEntry>> {
    let entry = state
        .cache
        .get(&name)
        .await?
        .ok_or(ApiError::NotFound(name))?;

    Ok(Json((*entry).clone()))
}

/// Handler for PUT /properties/:name
///
/// Writes a property through to the store; the completed write is visible
/// to every subsequent read served by this process.
pub async fn set_property_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<SetPropertyRequest>,
) -> ApiResult<Json<SetPropertyResponse>> {
    // Validate request
    if let Some(error_msg) = validate_property_name(&name) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let entry = match req.metadata {
        Some(metadata) => PropertyEntry::with_metadata(name.clone(), req.value, metadata),
        None => PropertyEntry::new(name.clone(), req.value),
    };
    state.cache.set(entry).await?;

    Ok(Json(SetPropertyResponse::new(name)))
}

/// Handler for DELETE /properties/:name
///
/// Resets a property to its default. Deleting a property that is not set
/// succeeds; the operation is idempotent.
pub async fn delete_property_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DeletePropertyResponse>> {
    state.cache.delete(&name).await?;

    Ok(Json(DeletePropertyResponse::new(name)))
}

/// Handler for GET /properties
///
/// Lists all stored properties straight from the backend; list reads do
/// not populate the cache.
pub async fn list_properties_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PropertyEntry>>> {
    let all = state.cache.list().await?;

    Ok(Json(all))
}

/// Handler for GET /stats
///
/// Returns cache counters plus the staleness poller's refresh mark.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let last_refresh = state.poller.last_refresh().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.invalidations,
        stats.entries,
        last_refresh,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
