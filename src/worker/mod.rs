//! Worker boundary.
//!
//! # Data Flow
//! ```text
//! caller (HTTP handler, CLI)
//!     → WorkerHandle::submit(WorkerRequest)
//!     → bounded mpsc queue
//!     → RoutingWorker (single consumer task)
//!         → resolve ids against the supplied collections
//!         → BatchAggregator::compute_batch
//!     → oneshot reply
//! ```
//!
//! # Design Decisions
//! - One batch in flight at a time; the queue serializes the rest
//! - Dropping the caller's future closes the reply channel, which cancels the batch
//! - The worker owns no state besides the aggregator (and its cache)

pub mod handle;
pub mod messages;

pub use handle::{RoutingWorker, WorkerHandle};
pub use messages::{WorkerRequest, WorkerResponse};
