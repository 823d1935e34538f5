//! Fake providers for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::geo::haversine_distance_km;
use crate::model::{Coordinate, RouteGeometry};
use crate::providers::{ProviderError, ProviderResult, ProviderRoute, RouteProvider};

pub(crate) fn as_dyn<P: RouteProvider + 'static>(provider: &Arc<P>) -> Arc<dyn RouteProvider> {
    provider.clone()
}

/// Always returns the same distance and duration.
pub(crate) struct FixedProvider {
    name: &'static str,
    distance_meters: f64,
    duration_seconds: f64,
    calls: AtomicUsize,
}

impl FixedProvider {
    pub(crate) fn new(name: &'static str, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            name,
            distance_meters,
            duration_seconds,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for FixedProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn route(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderRoute::new(
            RouteGeometry::direct(start, end),
            self.distance_meters,
            self.duration_seconds,
        ))
    }
}

/// Road distance = great-circle distance × 1.3, driven at 50 km/h.
pub(crate) struct ScaledProvider {
    calls: AtomicUsize,
}

impl ScaledProvider {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for ScaledProvider {
    fn name(&self) -> &str {
        "OSRM"
    }

    async fn route(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let meters = haversine_distance_km(start, end) * 1300.0;
        Ok(ProviderRoute::new(RouteGeometry::direct(start, end), meters, meters / 50_000.0 * 3600.0))
    }
}

pub(crate) enum Failure {
    Http(u16),
    Timeout,
    NoRoute,
}

/// Always fails the same way.
pub(crate) struct FailingProvider {
    name: &'static str,
    failure: Failure,
    calls: AtomicUsize,
}

impl FailingProvider {
    fn new(name: &'static str, failure: Failure) -> Self {
        Self {
            name,
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn http(name: &'static str, status: u16) -> Self {
        Self::new(name, Failure::Http(status))
    }

    pub(crate) fn timeout(name: &'static str) -> Self {
        Self::new(name, Failure::Timeout)
    }

    pub(crate) fn no_route(name: &'static str) -> Self {
        Self::new(name, Failure::NoRoute)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for FailingProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn route(&self, _start: Coordinate, _end: Coordinate) -> ProviderResult<ProviderRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.failure {
            Failure::Http(status) => ProviderError::Http { status },
            Failure::Timeout => ProviderError::Timeout { secs: 10 },
            Failure::NoRoute => ProviderError::NoRoute,
        })
    }
}

/// Panics for one destination, succeeds with a fixed route otherwise.
pub(crate) struct PanickingProvider {
    poisoned: Coordinate,
}

impl PanickingProvider {
    pub(crate) fn for_destination(poisoned: Coordinate) -> Self {
        Self { poisoned }
    }
}

#[async_trait]
impl RouteProvider for PanickingProvider {
    fn name(&self) -> &str {
        "OSRM"
    }

    async fn route(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        if end == self.poisoned {
            panic!("provider bug");
        }
        Ok(ProviderRoute::new(RouteGeometry::direct(start, end), 1000.0, 60.0))
    }
}

/// Never answers.
pub(crate) struct PendingProvider {
    calls: AtomicUsize,
}

impl PendingProvider {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for PendingProvider {
    fn name(&self) -> &str {
        "OSRM"
    }

    async fn route(&self, _start: Coordinate, _end: Coordinate) -> ProviderResult<ProviderRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}
