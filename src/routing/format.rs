//! RouteResult formatting.
//!
//! Provider units (meters, seconds) become display units (km, whole
//! minutes) here and nowhere else.

use crate::config::CostConfig;
use crate::model::{Destination, RouteResult, RouteType};
use crate::routing::fallback::ResolvedRoute;

/// Display colors, assigned by input position and cycled.
pub const ROUTE_PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#06B6D4", "#84CC16", "#F97316", "#EC4899",
    "#6366F1",
];

pub fn route_color(index: usize) -> &'static str {
    ROUTE_PALETTE[index % ROUTE_PALETTE.len()]
}

/// Fuel and cost derivation constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub fuel_liters_per_km: f64,
    pub price_per_liter: f64,
}

impl CostModel {
    pub fn fuel_liters(&self, distance_km: f64) -> f64 {
        distance_km * self.fuel_liters_per_km
    }

    pub fn cost(&self, fuel_liters: f64) -> f64 {
        fuel_liters * self.price_per_liter
    }
}

impl From<&CostConfig> for CostModel {
    fn from(config: &CostConfig) -> Self {
        Self {
            fuel_liters_per_km: config.fuel_liters_per_km,
            price_per_liter: config.price_per_liter,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::from(&CostConfig::default())
    }
}

/// Build the result row for the destination at input position `index`.
pub fn format_route_result(
    destination: &Destination,
    resolved: ResolvedRoute,
    index: usize,
    costs: &CostModel,
) -> RouteResult {
    let ResolvedRoute { route, provider } = resolved;

    let distance_meters = non_negative(route.distance_meters);
    let duration_seconds = non_negative(route.duration_seconds);
    let distance_km = distance_meters / 1000.0;
    let duration_minutes = (duration_seconds / 60.0).round() as u32;
    let estimated_fuel_liters = costs.fuel_liters(distance_km);
    let estimated_cost = costs.cost(estimated_fuel_liters);

    let route_type = if provider.is_direct() {
        RouteType::Shortest
    } else {
        RouteType::Fastest
    };

    RouteResult {
        destination_id: destination.id().to_string(),
        destination_name: destination.display_name().to_string(),
        destination_kind: destination.kind(),
        address: destination.address().to_string(),
        destination_coordinates: destination.coordinates(),
        distance_km,
        duration_minutes,
        estimated_fuel_liters,
        estimated_cost,
        route_type,
        provider_used: provider,
        geometry: route.geometry,
        display_color: route_color(index).to_string(),
        distance_meters,
        duration_seconds,
    }
}

// NaN and negative provider values collapse to zero.
fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}
