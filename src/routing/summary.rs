//! Aggregate figures for one batch.

use serde::{Deserialize, Serialize};

use crate::model::RouteResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_routes: usize,
    pub total_distance_km: f64,
    pub total_duration_minutes: u64,
    pub total_fuel_liters: f64,
    pub total_cost: f64,
    pub average_distance_km: f64,
    pub average_duration_minutes: f64,
    pub nearest_destination_id: Option<String>,
    /// Rows resolved by straight-line distance.
    pub approximate_count: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[RouteResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let total_routes = results.len();
        let total_distance_km: f64 = results.iter().map(|r| r.distance_km).sum();
        let total_duration_minutes: u64 = results.iter().map(|r| u64::from(r.duration_minutes)).sum();

        Self {
            total_routes,
            total_distance_km,
            total_duration_minutes,
            total_fuel_liters: results.iter().map(|r| r.estimated_fuel_liters).sum(),
            total_cost: results.iter().map(|r| r.estimated_cost).sum(),
            average_distance_km: total_distance_km / total_routes as f64,
            average_duration_minutes: total_duration_minutes as f64 / total_routes as f64,
            nearest_destination_id: results
                .iter()
                .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
                .map(|r| r.destination_id.clone()),
            approximate_count: results.iter().filter(|r| r.is_approximate()).count(),
        }
    }
}
