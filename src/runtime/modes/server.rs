//! Server mode
//!
//! Starts the HTTP server with the JSON API and the static frontend, and
//! tears down the expiry sweeper on exit.

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, from_fn},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure;
use crate::api::middleware::trace_request;
use crate::api::services::FrontendRoot;
use crate::config::StaticConfig;
use crate::runtime::lifetime;
use crate::storage::TextStore;

/// Run the HTTP server until it stops or a shutdown signal arrives.
///
/// **Note**: logging must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let store = startup.store.clone();
    let frontend = startup.frontend.clone();
    let api_prefix = startup.api_prefix.clone();

    let served = serve(config, store, frontend, api_prefix).await;

    lifetime::shutdown::finish_server(served, startup.sweeper, startup.store.len()).await
}

/// Bind and run until the server stops or a shutdown signal arrives
async fn serve(
    config: StaticConfig,
    store: Arc<TextStore>,
    frontend: FrontendRoot,
    api_prefix: String,
) -> Result<()> {
    let cpu_count = config.server.cpu_count.min(32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let api_prefix_log = api_prefix.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(from_fn(trace_request))
            .configure(configure(store.clone(), frontend.clone(), &api_prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);
    info!("API available at {}", api_prefix_log);

    let server_handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            server_handle.stop(true).await;
        }
    }

    Ok(())
}
