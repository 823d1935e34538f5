//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → PlannerConfig (validated, immutable)
//!     → handed to the provider, cache, worker and HTTP constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CacheConfig, CostConfig, ListenerConfig, LogFormat, ObservabilityConfig, PlannerConfig,
    ProviderConfig, WorkerConfig,
};
pub use validation::{validate_config, ValidationError};
