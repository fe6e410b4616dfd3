//! Request monitor demo server.
//!
//! Wires the tracking middleware and the monitor loop into a minimal Axum
//! application. Useful for exercising the subsystem end to end: hit `/slow`
//! concurrently and watch the long-running and parallel notifications appear
//! in the logs.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;

use request_monitor::config::loader::load_config;
use request_monitor::config::watcher::ConfigWatcher;
use request_monitor::config::MonitorAppConfig;
use request_monitor::http::middleware::track_requests;
use request_monitor::lifecycle::{drain, Shutdown};
use request_monitor::observability::{logging, metrics};
use request_monitor::tracking::{LongRunningMonitor, TrackingManager};

#[derive(Debug, Parser)]
#[command(name = "request-monitor", about = "Request tracking demo server")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from the config.
    #[arg(long)]
    bind: Option<String>,
}

async fn index() -> &'static str {
    "ok\n"
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "finally\n"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MonitorAppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("request-monitor v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        threshold_ms = config.tracking.long_running.threshold_ms,
        scan_interval_ms = config.tracking.long_running.scan_interval_ms,
        barrier = config.tracking.parallel.barrier,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let manager = Arc::new(TrackingManager::with_default_listeners(
        config.tracking.clone(),
    )?);

    let shutdown = Shutdown::new();
    let monitor_handle =
        tokio::spawn(LongRunningMonitor::new(manager.clone()).run(shutdown.subscribe()));

    // Hot reload of tracking settings while the server runs.
    let _watcher = match &args.config {
        Some(path) => {
            let (watcher, mut updates) = ConfigWatcher::new(path);
            let reload_manager = manager.clone();
            tokio::spawn(async move {
                while let Some(new_config) = updates.recv().await {
                    if let Err(e) = reload_manager.update_settings(new_config.tracking) {
                        tracing::error!("Rejected reloaded settings: {}", e);
                    }
                }
            });
            Some(watcher.run()?)
        }
        None => None,
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/slow", get(slow))
        .layer(middleware::from_fn_with_state(
            manager.clone(),
            track_requests,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown signal received");
    })
    .await?;

    shutdown.trigger();
    if !drain(monitor_handle, Duration::from_secs(5)).await {
        tracing::warn!("Monitor did not stop within the drain deadline");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
