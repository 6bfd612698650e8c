//! Cache Module
//!
//! Provides the read-through property cache: per-name single-flight fills,
//! negative caching of confirmed-missing names, and full-clear
//! invalidation driven by local writes and the staleness poller.

mod slot;
mod stats;
mod store;


// Re-export public types
pub use slot::CacheSlot;
pub use stats::{CacheMetrics, CacheStats};
pub use store::PropertyCache;
