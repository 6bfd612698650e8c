//! Property Cache Module
//!
//! Read-through cache over a property storage backend, combining per-name
//! single-flight fills, negative caching, and full-clear invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

use crate::cache::{CacheMetrics, CacheSlot, CacheStats};
use crate::error::StorageResult;
use crate::models::PropertyEntry;
use crate::storage::PropertyStorage;

/// Shared fill cell for one property name.
///
/// The cell is installed empty when the first reader misses and is filled
/// at most once; every concurrent reader of the same name awaits the same
/// cell, so a missing key costs exactly one backend query no matter how
/// many readers race on it.
type SlotCell = Arc<OnceCell<CacheSlot>>;

// == Property Cache ==
/// Read-through, write-invalidated cache for dynamic configuration
/// properties.
///
/// Reads fill the cache one name at a time, including an explicit marker
/// for names the backend confirms are not set. Any successful local write
/// clears the whole cache before returning, so a completed `set` is always
/// visible to subsequent reads in this process. Writes made by other
/// processes against the same backend become visible only once the
/// staleness poller notices them, i.e. within one refresh interval; that
/// window is an accepted consistency bound, not an oversight.
pub struct PropertyCache {
    /// Next layer down, usually the durable store
    storage: Arc<dyn PropertyStorage>,
    /// One fill cell per property name
    slots: RwLock<HashMap<String, SlotCell>>,
    /// Hit/miss/invalidation counters
    metrics: CacheMetrics,
    /// When false, every call bypasses the cache entirely
    enabled: bool,
}

impl PropertyCache {
    // == Constructor ==
    /// Creates an enabled cache in front of `storage`.
    pub fn new(storage: Arc<dyn PropertyStorage>) -> Self {
        Self::with_enabled(storage, true)
    }

    /// Creates a cache with an explicit enable flag.
    ///
    /// A disabled cache delegates every call straight to the backend and
    /// never reads or populates its map.
    pub fn with_enabled(storage: Arc<dyn PropertyStorage>, enabled: bool) -> Self {
        Self {
            storage,
            slots: RwLock::new(HashMap::new()),
            metrics: CacheMetrics::new(),
            enabled,
        }
    }

    // == Get ==
    /// Reads a property through the cache.
    ///
    /// A filled slot (value or confirmed-absent) answers without touching
    /// the backend. On a miss, concurrent readers of the same name share a
    /// single backend fetch; readers of other names fill independently and
    /// in parallel. A failed fetch fills nothing, so the next reader
    /// retries against the backend.
    pub async fn get(&self, name: &str) -> StorageResult<Option<Arc<PropertyEntry>>> {
        if !self.enabled {
            return Ok(self.storage.get_property(name).await?.map(Arc::new));
        }

        // Fast path: the cell already exists. The lock guard must not be
        // held past this block; awaiting the backend under it would stall
        // fills for every other key.
        let existing = {
            let slots = self.slots.read().await;
            slots.get(name).cloned()
        };
        if let Some(cell) = existing {
            if let Some(slot) = cell.get() {
                self.metrics.record_hit();
                return Ok(slot.entry());
            }
            // Fill still in flight; wait on it.
            return self.fill(name, cell).await;
        }

        // Miss: install the cell for this name, then fill it. The entry
        // API keeps the install atomic when two readers race on a new name.
        let cell = {
            let mut slots = self.slots.write().await;
            slots
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };
        self.fill(name, cell).await
    }

    // == Fill ==
    /// Performs (or waits on) the single-flight fill for `name`.
    async fn fill(
        &self,
        name: &str,
        cell: SlotCell,
    ) -> StorageResult<Option<Arc<PropertyEntry>>> {
        let mut performed_fetch = false;
        let slot = cell
            .get_or_try_init(|| {
                performed_fetch = true;
                self.metrics.record_miss();
                debug!("Cache miss for property '{}', querying backend", name);
                async move {
                    let found = self.storage.get_property(name).await?;
                    Ok(CacheSlot::from_lookup(found))
                }
            })
            .await?;
        if !performed_fetch {
            // Another reader's fetch answered for us.
            self.metrics.record_hit();
        }
        Ok(slot.entry())
    }

    // == Set ==
    /// Writes a property through to the backend, then clears the cache.
    ///
    /// The backend write happens first: if it fails, the error propagates
    /// and the cache is left untouched, which is correct because the write
    /// did not take effect. On success the entire cache is cleared rather
    /// than just `name`; writes are rare compared to reads, and a full
    /// clear avoids tracking dependent keys.
    pub async fn set(&self, entry: PropertyEntry) -> StorageResult<()> {
        if !self.enabled {
            return self.storage.set_property(entry).await;
        }

        let name = entry.name.clone();
        self.storage.set_property(entry).await?;
        self.invalidate_all().await;
        debug!("Property '{}' written, cache cleared", name);
        Ok(())
    }

    // == Delete ==
    /// Removes a property (reset to default) through to the backend, then
    /// clears the cache. Same ordering and failure rules as `set`.
    pub async fn delete(&self, name: &str) -> StorageResult<()> {
        if !self.enabled {
            return self.storage.delete_property(name).await;
        }

        self.storage.delete_property(name).await?;
        self.invalidate_all().await;
        debug!("Property '{}' removed, cache cleared", name);
        Ok(())
    }

    // == List ==
    /// Lists all properties straight from the backend.
    ///
    /// List reads are not cached; only single-name lookups are.
    pub async fn list(&self) -> StorageResult<Vec<PropertyEntry>> {
        self.storage.list_properties().await
    }

    // == Invalidate ==
    /// Clears every cached slot.
    ///
    /// Idempotent and safe to run concurrently with reads: a fill still in
    /// flight completes into its detached cell, which the cleared map no
    /// longer references, so the next read for that name fetches fresh.
    pub async fn invalidate_all(&self) {
        let dropped = {
            let mut slots = self.slots.write().await;
            let dropped = slots.len();
            slots.clear();
            dropped
        };
        self.metrics.record_invalidation();
        debug!("Cache invalidated, {} slots dropped", dropped);
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters and current size.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.slots.read().await.len();
        self.metrics.snapshot(entries)
    }

    // == Length ==
    /// Returns the current number of slots, filled or in flight.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no slots.
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    // == Is Enabled ==
    /// Whether caching is active for this instance.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
