//! Cache identity of a batch.

use std::collections::BTreeSet;

use crate::model::{Destination, DestinationKey, StartLocation};

/// Start location identity plus the sorted set of requested destinations.
///
/// Coordinates are compared bit-for-bit, so two requests share an entry only
/// when they name the exact same start point, address and destination set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey {
    latitude_bits: u64,
    longitude_bits: u64,
    address: String,
    destinations: BTreeSet<DestinationKey>,
}

impl BatchKey {
    pub fn new<'a>(start: &StartLocation, destinations: impl IntoIterator<Item = &'a Destination>) -> Self {
        Self {
            latitude_bits: start.coordinates.latitude.to_bits(),
            longitude_bits: start.coordinates.longitude.to_bits(),
            address: start.address.clone(),
            destinations: destinations.into_iter().map(Destination::key).collect(),
        }
    }
}
