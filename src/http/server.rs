//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router for the route and health handlers
//! - Wire up middleware (request id, tracing, timeout, body limit)
//! - Serve until the shutdown signal, then drain

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ListenerConfig;
use crate::http::handlers::{calculate_routes, health, HEALTH_PATH, ROUTES_PATH};
use crate::http::request::make_request_span;
use crate::worker::WorkerHandle;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub worker: WorkerHandle,
}

/// HTTP front end of the routing worker.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &ListenerConfig, worker: WorkerHandle) -> Self {
        let router = Self::build_router(config, AppState { worker });
        Self { router }
    }

    #[allow(deprecated)]
    fn build_router(config: &ListenerConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(DefaultBodyLimit::max(config.max_body_bytes));

        Router::new()
            .route(ROUTES_PATH, post(calculate_routes))
            .route(HEALTH_PATH, get(health))
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, for in-process callers.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
