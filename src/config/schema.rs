//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the planner.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route planner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    /// HTTP listener for the routing API.
    pub listener: ListenerConfig,

    /// External routing providers, in fallback order.
    pub providers: ProviderConfig,

    /// Batch result cache.
    pub cache: CacheConfig,

    /// Fuel and cost estimation constants.
    pub costs: CostConfig,

    /// Background routing worker.
    pub worker: WorkerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time allowed for one API request, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Routing provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OSRM-compatible `route/v1/driving` base URLs, tried in order.
    pub osrm_urls: Vec<String>,

    /// Valhalla-compatible `route` endpoint, tried after every OSRM mirror.
    /// An empty string disables it.
    pub valhalla_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent to providers.
    pub user_agent: String,

    /// Decimal precision of Valhalla's encoded shapes.
    pub valhalla_shape_precision: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            osrm_urls: vec![
                "https://router.project-osrm.org/route/v1/driving".to_string(),
                "https://osrm.router.place/route/v1/driving".to_string(),
                "https://routing.openstreetmap.de/routed-car/route/v1/driving".to_string(),
            ],
            valhalla_url: Some("https://valhalla1.openstreetmap.de/route".to_string()),
            timeout_secs: 10,
            user_agent: concat!("route-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            valhalla_shape_precision: 5,
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached batches.
    pub capacity: usize,

    /// Lifetime of a cached batch in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            ttl_secs: 300, // 5 minutes
        }
    }
}

/// Fuel and cost estimation constants.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CostConfig {
    /// Fuel consumption in liters per kilometer.
    pub fuel_liters_per_km: f64,

    /// Fuel price per liter.
    pub price_per_liter: f64,

    /// Travel time assumed for straight-line fallbacks (2.0 = 30 km/h).
    pub direct_minutes_per_km: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            fuel_liters_per_km: 0.095,
            price_per_liter: 1.75,
            direct_minutes_per_km: 2.0,
        }
    }
}

/// Routing worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Requests that may wait while one batch is in flight.
    pub queue_depth: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { queue_depth: 8 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
