use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::SweeperHandle;

/// Upper bound for stopping the sweeper
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Resolve once Ctrl+C (or SIGTERM on unix) arrives
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut term = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                wait_for_ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = wait_for_ctrl_c() => {}
            _ = term.recv() => {
                info!("SIGTERM received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, shutting down...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// Run the shutdown tasks whatever way the server ended, then hand back
/// its outcome
pub async fn finish_server(
    served: anyhow::Result<()>,
    sweeper: SweeperHandle,
    discarded: usize,
) -> anyhow::Result<()> {
    if let Err(e) = &served {
        error!("Server stopped with an error: {:#}", e);
    }

    perform_shutdown_tasks(sweeper, discarded).await;

    if served.is_ok() {
        warn!("Graceful shutdown complete");
    }
    served
}

/// Stop the background tasks; stored texts are dropped with the process
pub async fn perform_shutdown_tasks(sweeper: SweeperHandle, discarded: usize) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), sweeper.shutdown()).await {
        Ok(()) => {
            info!("Expiry sweeper stopped");
        }
        Err(_) => {
            error!(
                "Expiry sweeper did not stop within {} seconds",
                SHUTDOWN_TIMEOUT_SECS
            );
        }
    }

    if discarded > 0 {
        info!("Discarding {} in-memory text slots", discarded);
    }
}
