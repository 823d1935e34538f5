//! Provider-level types and errors.

use thiserror::Error;

use crate::geo::PolylineError;
use crate::model::{Coordinate, RouteGeometry};

/// A route as returned by one provider, in provider units.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub geometry: RouteGeometry,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl ProviderRoute {
    pub fn new(geometry: impl Into<RouteGeometry>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            geometry: geometry.into(),
            distance_meters,
            duration_seconds,
        }
    }

    /// Straight-line route at `minutes_per_km`.
    pub fn direct(start: Coordinate, end: Coordinate, distance_km: f64, minutes_per_km: f64) -> Self {
        Self {
            geometry: RouteGeometry::direct(start, end),
            distance_meters: distance_km * 1000.0,
            duration_seconds: distance_km * minutes_per_km * 60.0,
        }
    }
}

/// A single provider call failed. The caller tries the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-2xx HTTP status.
    #[error("HTTP status {status}")]
    Http { status: u16 },

    /// The response contained no route.
    #[error("no route found")]
    NoRoute,

    /// No response within the deadline.
    #[error("request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The returned shape could not be decoded.
    #[error("invalid route shape: {0}")]
    Polyline(#[from] PolylineError),
}

impl ProviderError {
    /// Short label used as a metrics outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProviderError::Http { .. } => "http_error",
            ProviderError::NoRoute => "no_route",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Transport(_) => "transport_error",
            ProviderError::Decode(_) | ProviderError::Polyline(_) => "decode_error",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
