//! Multi-destination route planning.
//!
//! Computes driving routes from one start location to many destinations,
//! trying OSRM mirrors, then Valhalla, then a straight-line estimate, and
//! caches whole batches.

// Domain
pub mod geo;
pub mod model;

// Core pipeline
pub mod cache;
pub mod providers;
pub mod routing;
pub mod worker;

// Outer surfaces
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::PlannerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::BatchAggregator;
pub use worker::{RoutingWorker, WorkerHandle, WorkerRequest, WorkerResponse};
