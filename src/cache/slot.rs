//! Cache Slot Module
//!
//! Defines the cached outcome of a single backend lookup.

use std::sync::Arc;

use crate::models::PropertyEntry;

// == Cache Slot ==
/// Outcome of a backend lookup, cached verbatim.
///
/// `Absent` records that the backend confirmed the property is not set, so
/// repeat reads for a missing name skip the backend entirely (negative
/// caching). "Not yet looked up" is represented by the slot not existing in
/// the map at all, never by a sentinel value compared by identity.
#[derive(Debug, Clone)]
pub enum CacheSlot {
    /// The property exists upstream with this value
    Present(Arc<PropertyEntry>),
    /// The backend confirmed the property is not set
    Absent,
}

impl CacheSlot {
    // == Constructor ==
    /// Builds a slot from a backend lookup result.
    pub fn from_lookup(found: Option<PropertyEntry>) -> Self {
        match found {
            Some(entry) => CacheSlot::Present(Arc::new(entry)),
            None => CacheSlot::Absent,
        }
    }

    // == Entry ==
    /// Returns the cached entry, or None for a negative slot.
    pub fn entry(&self) -> Option<Arc<PropertyEntry>> {
        match self {
            CacheSlot::Present(entry) => Some(Arc::clone(entry)),
            CacheSlot::Absent => None,
        }
    }

    /// Returns true if this slot records a confirmed-missing property.
    pub fn is_absent(&self) -> bool {
        matches!(self, CacheSlot::Absent)
    }
}
