//! Coordinate value types.

use serde::{Deserialize, Serialize};

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Where every route of a batch starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartLocation {
    pub coordinates: Coordinate,
    /// Display address, part of the cache identity.
    pub address: String,
}

impl StartLocation {
    pub fn new(coordinates: Coordinate, address: impl Into<String>) -> Self {
        Self {
            coordinates,
            address: address.into(),
        }
    }
}
