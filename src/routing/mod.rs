//! Route aggregation pipeline.
//!
//! # Data Flow
//! ```text
//! BatchAggregator::compute_batch(start, destinations)
//!     → ResultCache hit? return the cached batch
//!     → one FallbackRouter::resolve_route per destination, all concurrent
//!         → providers in order (OSRM mirrors, then Valhalla)
//!         → straight-line route when every provider failed
//!     → format.rs (km / minutes / fuel / cost / color, exactly once)
//!     → sort ascending by distance
//!     → ResultCache::set
//! ```
//!
//! # Design Decisions
//! - Per-destination failures never fail the batch
//! - No retries, backoff or circuit breaking: ordered fallback is the only policy
//! - No concurrency limit on the fan-out

pub mod aggregator;
pub mod error;
pub mod fallback;
pub mod format;
pub mod summary;

pub use aggregator::BatchAggregator;
pub use error::RoutingError;
pub use fallback::{FallbackRouter, ResolvedRoute};
pub use format::{format_route_result, route_color, CostModel, ROUTE_PALETTE};
pub use summary::BatchSummary;

#[cfg(test)]
pub(crate) mod testing;
