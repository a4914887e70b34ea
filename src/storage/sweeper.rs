//! Background expiry sweeper
//!
//! Reclaims memory held by slots that expire without ever being read again.
//! Access-time expiry in [`TextStore`] already hides expired entries from
//! clients, so a late or skipped sweep only delays reclamation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::TextStore;

/// Default period between two sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Result of one sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries removed by this pass
    pub removed: usize,
    /// Entries left in the store afterwards
    pub remaining: usize,
}

pub struct ExpirySweeper {
    store: Arc<TextStore>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<TextStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single pass right now
    pub fn run_once(&self) -> SweepReport {
        let removed = self.store.sweep_expired();
        let report = SweepReport {
            removed,
            remaining: self.store.len(),
        };

        if report.removed > 0 {
            info!(
                "Expiry sweep removed {} entries, {} remaining",
                report.removed, report.remaining
            );
        } else {
            debug!("Expiry sweep found nothing, {} entries", report.remaining);
        }

        report
    }

    /// Start the periodic sweep on the tokio runtime.
    ///
    /// The first pass runs one full interval after start.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let interval = self.interval();
        let join = tokio::spawn(self.run(shutdown_rx));

        info!(
            "Expiry sweeper started (interval: {}s)",
            interval.as_secs_f64()
        );

        SweeperHandle { shutdown_tx, join }
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires immediately; the first real sweep waits a period
        ticker.tick().await;

        let sweeper = Arc::new(self);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // a panicking pass must not take the loop down with it
                    let pass = Arc::clone(&sweeper);
                    if let Err(e) = tokio::task::spawn_blocking(move || pass.run_once()).await {
                        error!("Expiry sweep failed, retrying next tick: {}", e);
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Expiry sweeper stopped");
    }
}

/// Handle to a running sweeper task
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Ask the loop to stop and wait for it
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            error!("Expiry sweeper task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
