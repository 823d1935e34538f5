//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Ctrl+C / SIGTERM (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → HTTP server stops accepting, drains in-flight requests
//!     → routing worker leaves its queue loop
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
