//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Staleness Refresh: Detects external property changes and clears the cache

mod refresh;

pub use refresh::{spawn_refresh_task, RefreshOutcome, StalenessPoller};
