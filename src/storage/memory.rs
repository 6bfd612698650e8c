//! In-Memory Store Module
//!
//! Reference `PropertyStorage` implementation backed by a HashMap. Stands
//! in for a durable backend in the default wiring and in tests; every
//! write stamps a modification time so changed-since queries work.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::StorageResult;
use crate::models::PropertyEntry;
use crate::storage::PropertyStorage;

// == Stored Property ==
/// A property entry plus the bookkeeping the changed-since query needs.
#[derive(Debug, Clone)]
struct StoredProperty {
    entry: PropertyEntry,
    modified_at: DateTime<Utc>,
}

// == Memory Store ==
/// In-memory property store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredProperty>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number of stored properties.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no properties are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PropertyStorage for MemoryStore {
    async fn get_property(&self, name: &str) -> StorageResult<Option<PropertyEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(name).map(|stored| stored.entry.clone()))
    }

    async fn set_property(&self, entry: PropertyEntry) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            entry.name.clone(),
            StoredProperty {
                entry,
                modified_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete_property(&self, name: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(name);
        Ok(())
    }

    async fn list_properties(&self) -> StorageResult<Vec<PropertyEntry>> {
        let entries = self.entries.read().await;
        let mut all: Vec<PropertyEntry> =
            entries.values().map(|stored| stored.entry.clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn list_changed_since(
        &self,
        since: DateTime<Utc>,
    ) -> StorageResult<Vec<PropertyEntry>> {
        let entries = self.entries.read().await;
        let changed = entries
            .values()
            .filter(|stored| stored.modified_at > since)
            .map(|stored| stored.entry.clone())
            .collect();
        Ok(changed)
    }
}
