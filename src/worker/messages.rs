//! Inbound and outbound worker messages.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{CustomAddress, Destination, RouteResult, StartLocation, Station};
use crate::routing::error::{RoutingError, RoutingResult};

/// One batch request, with the collections its ids refer to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerRequest {
    pub start_location: Option<StartLocation>,
    pub destination_station_ids: Vec<String>,
    pub destination_custom_address_ids: Vec<String>,
    pub all_known_stations: Vec<Station>,
    pub all_known_custom_addresses: Vec<CustomAddress>,
}

impl WorkerRequest {
    /// Check the request shape and resolve ids into destinations.
    ///
    /// Stations come first, then custom addresses, each in id order as
    /// requested. Unknown ids are skipped; a repeated id keeps its first position.
    pub fn resolve(&self) -> RoutingResult<(StartLocation, Vec<Destination>)> {
        let start = self
            .start_location
            .clone()
            .ok_or_else(|| RoutingError::MalformedRequest("missing start location".into()))?;

        if !start.coordinates.is_valid() {
            return Err(RoutingError::MalformedRequest(format!(
                "start coordinates out of range: {}, {}",
                start.coordinates.latitude, start.coordinates.longitude
            )));
        }

        if self.destination_station_ids.is_empty() && self.destination_custom_address_ids.is_empty() {
            return Err(RoutingError::MalformedRequest("no destinations selected".into()));
        }

        let mut destinations =
            Vec::with_capacity(self.destination_station_ids.len() + self.destination_custom_address_ids.len());

        let mut seen = HashSet::new();
        for id in &self.destination_station_ids {
            if !seen.insert(("station", id.as_str())) {
                continue;
            }
            match self.all_known_stations.iter().find(|s| &s.id == id) {
                Some(station) => destinations.push(Destination::Station(station.clone())),
                None => tracing::warn!(station_id = %id, "Unknown station id, skipping"),
            }
        }
        for id in &self.destination_custom_address_ids {
            if !seen.insert(("custom", id.as_str())) {
                continue;
            }
            match self.all_known_custom_addresses.iter().find(|c| &c.id == id) {
                Some(address) => destinations.push(Destination::Custom(address.clone())),
                None => tracing::warn!(custom_address_id = %id, "Unknown custom address id, skipping"),
            }
        }

        Ok((start, destinations))
    }
}

/// Exactly one per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkerResponse {
    Success { route_results: Vec<RouteResult> },
    Error { message: String },
}

impl From<RoutingResult<Vec<RouteResult>>> for WorkerResponse {
    fn from(result: RoutingResult<Vec<RouteResult>>) -> Self {
        match result {
            Ok(route_results) => WorkerResponse::Success { route_results },
            Err(e) => WorkerResponse::Error { message: e.to_string() },
        }
    }
}
