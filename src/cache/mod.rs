//! Batch result caching.
//!
//! # Data Flow
//! ```text
//! BatchAggregator
//!     → key.rs (start location + destination set → BatchKey)
//!     → result.rs (ResultCache: moka LRU with per-entry TTL, metrics)
//! ```
//!
//! # Design Decisions
//! - Expiry is checked on read; there is no background sweep
//! - Entries are shared read-only (`Arc<[RouteResult]>`) and only replaced wholesale

pub mod key;
pub mod result;

pub use key::BatchKey;
pub use result::{CachedBatch, ResultCache};
