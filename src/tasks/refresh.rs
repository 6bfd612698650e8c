//! Staleness Refresh Task
//!
//! Background task that periodically asks the backing store for property
//! changes made by other writers and clears the cache when any are found.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::PropertyCache;
use crate::error::StorageResult;
use crate::storage::PropertyStorage;

// == Refresh Outcome ==
/// What a single poll run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Polling is disabled by configuration
    Disabled,
    /// A previous run was still in progress; this tick did nothing
    Skipped,
    /// The run completed; `invalidated` tells whether the cache was cleared
    Completed { invalidated: bool },
    /// The change query failed; the refresh mark was left untouched
    Failed,
}

// == Staleness Poller ==
/// Periodically reconciles the cache with writes made by other processes.
///
/// Each run asks the store for entries changed since the previous
/// successful run and clears the whole cache if there are any. The poller
/// keeps no per-key bookkeeping; a remote write of any property costs one
/// full clear, which bounds staleness to the polling interval without
/// revision tracking.
pub struct StalenessPoller {
    /// Cache to clear when external changes are detected
    cache: Arc<PropertyCache>,
    /// Store queried for changes
    storage: Arc<dyn PropertyStorage>,
    /// Start time of the last successful run; None until the first one
    last_refresh: RwLock<Option<DateTime<Utc>>>,
    /// Makes runs non-overlapping: a tick that fires while a run is still
    /// active is skipped instead of queued
    running: AtomicBool,
    /// When false, runs return immediately without touching any state
    enabled: bool,
}

impl StalenessPoller {
    // == Constructor ==
    /// Creates a poller over the given cache and store.
    pub fn new(cache: Arc<PropertyCache>, storage: Arc<dyn PropertyStorage>, enabled: bool) -> Self {
        Self {
            cache,
            storage,
            last_refresh: RwLock::new(None),
            running: AtomicBool::new(false),
            enabled,
        }
    }

    // == Run Once ==
    /// Executes one poll run, unless disabled or one is already active.
    ///
    /// This is the error boundary for the background task: a storage
    /// failure is logged here and reported as `Failed`, never propagated,
    /// so the timer loop survives and retries on the next tick.
    pub async fn run_once(&self) -> RefreshOutcome {
        if !self.enabled {
            return RefreshOutcome::Disabled;
        }

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Previous refresh run still active, skipping tick");
            return RefreshOutcome::Skipped;
        }

        debug!("Running property refresh");
        let outcome = match self.refresh().await {
            Ok(invalidated) => RefreshOutcome::Completed { invalidated },
            Err(e) => {
                error!("Property refresh failed, will retry next tick: {}", e);
                RefreshOutcome::Failed
            }
        };
        self.running.store(false, Ordering::Release);
        outcome
    }

    // == Refresh ==
    /// One reconciliation pass. Returns whether the cache was cleared.
    async fn refresh(&self) -> StorageResult<bool> {
        let now = Utc::now();
        let last = *self.last_refresh.read().await;

        let mut invalidated = false;
        if let Some(since) = last {
            // A failure here returns early and leaves the mark untouched,
            // so the next run re-checks the same window.
            let changed = self.storage.list_changed_since(since).await?;
            if !changed.is_empty() {
                info!(
                    "{} properties changed externally, clearing cache",
                    changed.len()
                );
                self.cache.invalidate_all().await;
                invalidated = true;
            }
        }
        // The first run has nothing to compare against; it only plants the
        // mark that the next run measures from.

        *self.last_refresh.write().await = Some(now);
        Ok(invalidated)
    }

    // == Last Refresh ==
    /// Start time of the last successful run, if any.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().await
    }
}

// == Spawn ==
/// Spawns the background task driving the poller on a fixed interval.
///
/// The first tick of a tokio interval completes immediately; it is
/// consumed before the loop so the first real run lands one full interval
/// after startup. Slow runs cannot pile up: the interval skips missed
/// ticks, and the poller's guard skips ticks arriving while a run is
/// active.
///
/// # Arguments
/// * `poller` - Shared poller instance
/// * `refresh_interval_secs` - Seconds between staleness checks
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_refresh_task(
    poller: Arc<StalenessPoller>,
    refresh_interval_secs: u64,
) -> JoinHandle<()> {
    let period = Duration::from_secs(refresh_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting property refresh task with interval of {} seconds",
            refresh_interval_secs
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The immediate first tick; real ticks start one period from now.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            poller.run_once().await;
        }
    })
}
