//! Route planner server.
//!
//! ```text
//!   POST /api/v1/routes ──▶ http ──▶ worker queue ──▶ BatchAggregator
//!                                                        │
//!                                      ResultCache ◀─────┤
//!                                                        ▼
//!                                   FallbackRouter: OSRM mirrors → Valhalla → direct
//! ```
//!
//! Usage: `route-planner [CONFIG.toml]`. Without a path the built-in
//! defaults are used.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use route_planner::config::{load_config, PlannerConfig};
use route_planner::lifecycle::{shutdown_on_signal, Shutdown};
use route_planner::observability::{logging, metrics};
use route_planner::{BatchAggregator, HttpServer, RoutingWorker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_config(&path)?,
        None => PlannerConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "route-planner starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        osrm_mirrors = config.providers.osrm_urls.len(),
        valhalla = config.providers.valhalla_url.as_deref().unwrap_or("disabled"),
        cache_capacity = config.cache.capacity,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let aggregator = Arc::new(BatchAggregator::from_config(&config)?);
    let (worker, worker_task) = RoutingWorker::spawn(aggregator, config.worker.queue_depth, shutdown.subscribe());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    HttpServer::new(&config.listener, worker)
        .run(listener, shutdown.subscribe())
        .await?;

    if let Err(e) = worker_task.await {
        tracing::error!(error = %e, "Routing worker task failed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
