//! Batch fan-out, formatting, ordering and caching.

use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use futures_util::FutureExt;

use crate::cache::{BatchKey, CachedBatch, ResultCache};
use crate::config::PlannerConfig;
use crate::model::{Destination, RouteResult, StartLocation};
use crate::observability::metrics;
use crate::providers::{build_providers, ProviderResult};
use crate::routing::fallback::FallbackRouter;
use crate::routing::format::{format_route_result, CostModel};

/// Computes one batch of routes from a shared start location.
///
/// Constructed once per process and handed to the worker; the cache lives
/// and dies with it.
#[derive(Debug)]
pub struct BatchAggregator {
    router: FallbackRouter,
    cache: ResultCache,
    costs: CostModel,
}

impl BatchAggregator {
    pub fn new(router: FallbackRouter, cache: ResultCache, costs: CostModel) -> Self {
        Self { router, cache, costs }
    }

    pub fn from_config(config: &PlannerConfig) -> ProviderResult<Self> {
        let providers = build_providers(&config.providers)?;
        tracing::info!(providers = providers.len(), "Routing providers configured");

        Ok(Self::new(
            FallbackRouter::new(providers, config.costs.direct_minutes_per_km),
            ResultCache::from_config(&config.cache),
            CostModel::from(&config.costs),
        ))
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Route from `start` to every destination, nearest first.
    ///
    /// Per-destination failures never fail the batch. A destination listed
    /// more than once is routed once, at its first position. Identical
    /// requests (same start, same destination set in any order) are served
    /// from the cache until it expires.
    pub async fn compute_batch(&self, start: &StartLocation, destinations: &[Destination]) -> CachedBatch {
        if destinations.is_empty() {
            return Arc::from(Vec::new());
        }

        let mut seen = HashSet::with_capacity(destinations.len());
        let destinations: Vec<&Destination> = destinations.iter().filter(|d| seen.insert(d.key())).collect();

        let key = BatchKey::new(start, destinations.iter().copied());
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(destinations = destinations.len(), "Batch served from cache");
            return hit;
        }

        let started = Instant::now();
        let origin = start.coordinates;

        let lookups = destinations.iter().copied().enumerate().map(|(index, destination)| async move {
            let end = destination.coordinates();
            let resolved = match AssertUnwindSafe(self.router.resolve_route(origin, end))
                .catch_unwind()
                .await
            {
                Ok(resolved) => resolved,
                Err(_) => {
                    tracing::error!(
                        destination_id = destination.id(),
                        "Route resolution panicked, using direct distance"
                    );
                    metrics::record_direct_fallback();
                    self.router.direct(origin, end)
                }
            };
            format_route_result(destination, resolved, index, &self.costs)
        });

        let mut results: Vec<RouteResult> = join_all(lookups).await;
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        let batch: CachedBatch = Arc::from(results);
        self.cache.set(key, batch.clone()).await;

        metrics::record_batch(destinations.len(), started);
        tracing::info!(
            destinations = destinations.len(),
            approximate = batch.iter().filter(|r| r.is_approximate()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch computed"
        );

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, CustomAddress, ProviderUsed, Station, StationCategory};
    use crate::routing::format::route_color;
    use crate::routing::testing::{as_dyn, FailingProvider, PanickingProvider, ScaledProvider};

    fn start() -> StartLocation {
        StartLocation::new(Coordinate::new(48.78, 9.18), "Königstraße 1, Stuttgart")
    }

    fn destinations() -> Vec<Destination> {
        vec![
            Station::new("s-far", "Far", StationCategory::Headquarters, "", Coordinate::new(49.00, 9.40)).into(),
            CustomAddress::new("c-near", "Near", "", Coordinate::new(48.79, 9.19)).into(),
            Station::new("s-mid", "Mid", StationCategory::Precinct, "", Coordinate::new(48.85, 9.25)).into(),
        ]
    }

    fn aggregator(router: FallbackRouter) -> BatchAggregator {
        BatchAggregator::new(router, ResultCache::default(), CostModel::default())
    }

    #[tokio::test]
    async fn test_sorted_ascending_with_insertion_colors() {
        let provider = Arc::new(ScaledProvider::new());
        let agg = aggregator(FallbackRouter::new(vec![as_dyn(&provider)], 2.0));

        let batch = agg.compute_batch(&start(), &destinations()).await;

        let ids: Vec<_> = batch.iter().map(|r| r.destination_id.as_str()).collect();
        assert_eq!(ids, ["c-near", "s-mid", "s-far"]);
        assert!(batch.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));

        // Colors follow input position, not distance rank.
        assert_eq!(batch[0].display_color, route_color(1));
        assert_eq!(batch[1].display_color, route_color(2));
        assert_eq!(batch[2].display_color, route_color(0));
    }

    #[tokio::test]
    async fn test_all_providers_fail_keeps_cost_invariants() {
        let agg = aggregator(FallbackRouter::new(
            vec![
                as_dyn(&Arc::new(FailingProvider::http("OSRM", 500))),
                as_dyn(&Arc::new(FailingProvider::no_route("Valhalla"))),
            ],
            2.0,
        ));

        let batch = agg.compute_batch(&start(), &destinations()).await;

        assert_eq!(batch.len(), 3);
        for row in batch.iter() {
            assert_eq!(row.provider_used, ProviderUsed::Direct);
            assert_eq!(row.estimated_fuel_liters, row.distance_km * 0.095);
            assert_eq!(row.estimated_cost, row.estimated_fuel_liters * 1.75);
        }
    }

    #[tokio::test]
    async fn test_second_identical_batch_is_cached() {
        let provider = Arc::new(ScaledProvider::new());
        let agg = aggregator(FallbackRouter::new(vec![as_dyn(&provider)], 2.0));

        let first = agg.compute_batch(&start(), &destinations()).await;
        assert_eq!(provider.calls(), 3);

        let mut reordered = destinations();
        reordered.reverse();
        let second = agg.compute_batch(&start(), &reordered).await;

        assert_eq!(provider.calls(), 3, "no provider calls on a cache hit");
        assert_eq!(first, second);
        assert_eq!(agg.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_everything() {
        let provider = Arc::new(ScaledProvider::new());
        let agg = aggregator(FallbackRouter::new(vec![as_dyn(&provider)], 2.0));

        let batch = agg.compute_batch(&start(), &[]).await;

        assert!(batch.is_empty());
        assert_eq!(provider.calls(), 0);
        assert!(agg.cache().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_destination_yields_one_row() {
        let provider = Arc::new(ScaledProvider::new());
        let agg = aggregator(FallbackRouter::new(vec![as_dyn(&provider)], 2.0));
        let single = vec![destinations().remove(1)];
        let doubled = vec![single[0].clone(), single[0].clone()];

        let first = agg.compute_batch(&start(), &doubled).await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].display_color, route_color(0));
        assert_eq!(provider.calls(), 1);

        let second = agg.compute_batch(&start(), &single).await;
        assert_eq!(second.len(), 1);
        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_panicking_provider_falls_back_per_destination() {
        let poisoned = Coordinate::new(48.85, 9.25);
        let provider = Arc::new(PanickingProvider::for_destination(poisoned));
        let agg = aggregator(FallbackRouter::new(vec![as_dyn(&provider)], 2.0));

        let batch = agg.compute_batch(&start(), &destinations()).await;

        assert_eq!(batch.len(), 3);
        let mid = batch.iter().find(|r| r.destination_id == "s-mid").unwrap();
        assert!(mid.is_approximate());
        assert_eq!(mid.geometry.points(), &[start().coordinates, poisoned]);
        assert_eq!(batch.iter().filter(|r| r.is_approximate()).count(), 1);
    }
}
