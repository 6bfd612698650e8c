//! Property Storage Module
//!
//! Defines the capability interface the caching layer consumes, plus an
//! in-memory reference implementation used by the default server wiring
//! and by tests. A production deployment implements `PropertyStorage`
//! against its durable store of choice.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageResult;
use crate::models::PropertyEntry;

// == Property Storage Trait ==
/// Backing store for dynamic configuration properties.
///
/// Implementations own their own timeout and retry policy; the caching
/// layer calls these methods exactly once per logical operation and
/// propagates failures unchanged.
#[async_trait]
pub trait PropertyStorage: Send + Sync {
    /// Fetches a single property by name, or None if it is not set.
    async fn get_property(&self, name: &str) -> StorageResult<Option<PropertyEntry>>;

    /// Writes a property. A failed write must leave the store unchanged.
    async fn set_property(&self, entry: PropertyEntry) -> StorageResult<()>;

    /// Removes a property, resetting it to its default. Removing a
    /// property that is not set is a no-op.
    async fn delete_property(&self, name: &str) -> StorageResult<()>;

    /// Lists all currently-set properties.
    async fn list_properties(&self) -> StorageResult<Vec<PropertyEntry>>;

    /// Lists properties modified strictly after `since`.
    ///
    /// Only surviving entries are reported: a property deleted by another
    /// writer no longer carries a modification stamp and will not appear
    /// here.
    async fn list_changed_since(&self, since: DateTime<Utc>)
        -> StorageResult<Vec<PropertyEntry>>;
}
