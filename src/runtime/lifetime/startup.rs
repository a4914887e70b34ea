use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::api::services::FrontendRoot;
use crate::config::StaticConfig;
use crate::storage::{ExpirySweeper, SweeperHandle, TextStore};

/// Everything the HTTP server needs, built before it binds
pub struct StartupContext {
    pub store: Arc<TextStore>,
    pub sweeper: SweeperHandle,
    pub frontend: FrontendRoot,
    pub api_prefix: String,
}

/// Build the store, start the expiry sweeper and locate the frontend.
///
/// Must be called from within a tokio runtime.
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    if let Err(e) = config.validate() {
        bail!("{}", e.format_simple());
    }

    let store = Arc::new(TextStore::new(config.store.ttl()));
    info!(
        "Text store ready (ttl: {}s, sweep interval: {}s)",
        config.store.ttl_secs, config.store.sweep_interval_secs
    );

    let sweeper = ExpirySweeper::new(store.clone(), config.store.sweep_interval()).spawn();

    let frontend = FrontendRoot::new(&config.frontend.static_dir);
    if frontend.dir().join("index.html").is_file() {
        info!("Serving frontend from {}", frontend.dir().display());
    } else {
        warn!(
            "No index.html under {}, non-API requests will answer 404",
            frontend.dir().display()
        );
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        sweeper,
        frontend,
        api_prefix: config.frontend.api_prefix.clone(),
    })
}
