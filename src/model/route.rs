//! Route result rows produced by the batch aggregator.
//!
//! All display fields are normalized exactly once, when a row is built:
//! distances in kilometers, durations in whole minutes. The raw provider
//! values (meters, seconds) travel alongside for callers that need them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::coordinate::Coordinate;
use crate::model::destination::DestinationKind;

/// Ordered path actually driven. Two points (start, end) for a direct fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteGeometry(pub Vec<Coordinate>);

impl RouteGeometry {
    /// Straight line from `start` to `end`.
    pub fn direct(start: Coordinate, end: Coordinate) -> Self {
        Self(vec![start, end])
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Coordinate>> for RouteGeometry {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

/// Whether a row came from a real driving route or a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Fastest,
    Shortest,
}

/// Which provider produced a route, serialized as its name or `"direct"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderUsed {
    Provider(String),
    Direct,
}

impl ProviderUsed {
    pub const DIRECT: &'static str = "direct";

    pub fn is_direct(&self) -> bool {
        matches!(self, ProviderUsed::Direct)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderUsed::Provider(name) => name,
            ProviderUsed::Direct => Self::DIRECT,
        }
    }
}

impl fmt::Display for ProviderUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProviderUsed {
    fn from(value: String) -> Self {
        if value == Self::DIRECT {
            ProviderUsed::Direct
        } else {
            ProviderUsed::Provider(value)
        }
    }
}

impl From<ProviderUsed> for String {
    fn from(value: ProviderUsed) -> Self {
        value.as_str().to_string()
    }
}

/// One row per requested destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub destination_id: String,
    pub destination_name: String,
    pub destination_kind: DestinationKind,
    pub address: String,
    pub destination_coordinates: Coordinate,
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub estimated_fuel_liters: f64,
    pub estimated_cost: f64,
    pub route_type: RouteType,
    pub provider_used: ProviderUsed,
    pub geometry: RouteGeometry,
    pub display_color: String,
    /// Raw provider distance.
    pub distance_meters: f64,
    /// Raw provider duration.
    pub duration_seconds: f64,
}

impl RouteResult {
    pub fn is_approximate(&self) -> bool {
        self.provider_used.is_direct()
    }
}
