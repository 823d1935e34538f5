//! Ordered provider fallback.
//!
//! # Responsibilities
//! - Try each configured provider in order, accept the first success
//! - Synthesize a straight-line route when every provider failed
//!
//! # Design Decisions
//! - Never fails: the caller always gets a route
//! - No cross-call state; every call walks the full provider list

use std::sync::Arc;
use std::time::Instant;

use crate::geo::haversine_distance_km;
use crate::model::{Coordinate, ProviderUsed};
use crate::observability::metrics;
use crate::providers::{ProviderRoute, RouteProvider};

/// Route plus the provider that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub route: ProviderRoute,
    pub provider: ProviderUsed,
}

/// Walks an ordered provider list, falling back to great-circle distance.
#[derive(Clone)]
pub struct FallbackRouter {
    providers: Vec<Arc<dyn RouteProvider>>,
    direct_minutes_per_km: f64,
}

impl FallbackRouter {
    pub fn new(providers: Vec<Arc<dyn RouteProvider>>, direct_minutes_per_km: f64) -> Self {
        Self {
            providers,
            direct_minutes_per_km,
        }
    }

    /// Resolve one origin→destination route.
    pub async fn resolve_route(&self, start: Coordinate, end: Coordinate) -> ResolvedRoute {
        for (i, provider) in self.providers.iter().enumerate() {
            let started = Instant::now();
            match provider.route(start, end).await {
                Ok(route) => {
                    metrics::record_provider_request(provider.name(), "success", started);
                    tracing::debug!(
                        provider_idx = i,
                        provider = provider.name(),
                        distance_m = route.distance_meters,
                        "Route resolved"
                    );
                    return ResolvedRoute {
                        route,
                        provider: ProviderUsed::Provider(provider.name().to_string()),
                    };
                }
                Err(e) => {
                    metrics::record_provider_request(provider.name(), e.outcome(), started);
                    tracing::warn!(
                        provider_idx = i,
                        provider = provider.name(),
                        endpoint = provider.endpoint(),
                        error = %e,
                        "Routing provider failed, trying next provider"
                    );
                }
            }
        }

        tracing::warn!(
            providers = self.providers.len(),
            "All routing providers exhausted, using direct distance"
        );
        metrics::record_direct_fallback();
        self.direct(start, end)
    }

    /// Straight-line route at the configured average speed.
    pub fn direct(&self, start: Coordinate, end: Coordinate) -> ResolvedRoute {
        let distance_km = haversine_distance_km(start, end);
        ResolvedRoute {
            route: ProviderRoute::direct(start, end, distance_km, self.direct_minutes_per_km),
            provider: ProviderUsed::Direct,
        }
    }
}

impl std::fmt::Debug for FallbackRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.providers.iter().map(|p| p.endpoint()).collect();
        f.debug_struct("FallbackRouter")
            .field("providers", &names)
            .field("direct_minutes_per_km", &self.direct_minutes_per_km)
            .finish()
    }
}
