//! Routing provider clients.
//!
//! # Data Flow
//! ```text
//! FallbackRouter
//!     → osrm.rs (GET {base}/{lng},{lat};{lng},{lat}, GeoJSON geometry)
//!     → valhalla.rs (POST locations/costing, encoded polyline shape)
//!     → ProviderRoute (meters, seconds, coordinates)
//! ```
//!
//! # Design Decisions
//! - One request per call, bounded by a timeout; no retries at this layer
//! - Any failure (status, empty route list, timeout, bad payload) is returned to
//!   the caller, which moves on to the next provider

pub mod osrm;
pub mod types;
pub mod valhalla;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::ProviderConfig;
use crate::model::Coordinate;

pub use osrm::OsrmProvider;
pub use types::{ProviderError, ProviderResult, ProviderRoute};
pub use valhalla::ValhallaProvider;

/// A single external routing backend.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Name reported in `RouteResult::provider_used`.
    fn name(&self) -> &str;

    /// Where requests go, for logs.
    fn endpoint(&self) -> &str {
        self.name()
    }

    /// Compute one driving route from `start` to `end`.
    async fn route(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute>;
}

/// Build the configured providers in fallback order: every OSRM mirror, then Valhalla.
pub fn build_providers(config: &ProviderConfig) -> ProviderResult<Vec<Arc<dyn RouteProvider>>> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {e}")))?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let mut providers: Vec<Arc<dyn RouteProvider>> = Vec::new();
    for raw in &config.osrm_urls {
        let base = parse_url(raw)?;
        providers.push(Arc::new(OsrmProvider::new(client.clone(), base, timeout)));
    }

    if let Some(raw) = config.valhalla_url.as_deref().filter(|url| !url.is_empty()) {
        let endpoint = parse_url(raw)?;
        providers.push(Arc::new(
            ValhallaProvider::new(client.clone(), endpoint, timeout)
                .with_shape_precision(config.valhalla_shape_precision),
        ));
    }

    tracing::debug!(count = providers.len(), "Routing providers configured");
    Ok(providers)
}

fn parse_url(raw: &str) -> ProviderResult<Url> {
    raw.parse()
        .map_err(|e| ProviderError::Transport(format!("invalid provider URL '{raw}': {e}")))
}
