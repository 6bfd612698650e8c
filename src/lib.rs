//! Config Cache - A read-through cache server for dynamic configuration
//!
//! Fronts a property store with per-name read-through caching, full-clear
//! write invalidation, and a background staleness poller.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_refresh_task;
