//! HTTP surface for the routing worker.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (x-request-id assigned and propagated)
//!     → handlers.rs (decode WorkerRequest, submit to the worker)
//!     → WorkerResponse as JSON
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
