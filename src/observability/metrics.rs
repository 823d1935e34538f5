//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define planner metrics (provider outcomes, fallbacks, cache, batches)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `route_planner_provider_requests_total` (counter): provider calls by provider, outcome
//! - `route_planner_provider_request_duration_seconds` (histogram): provider latency
//! - `route_planner_direct_fallbacks_total` (counter): destinations resolved by straight line
//! - `route_planner_cache_lookups_total` (counter): cache lookups by result
//! - `route_planner_cache_entries` (gauge): cached batches
//! - `route_planner_batch_duration_seconds` (histogram): batch latency
//! - `route_planner_http_requests_total` (counter): API requests by path, status

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one provider call.
pub fn record_provider_request(provider: &str, outcome: &'static str, start: Instant) {
    counter!(
        "route_planner_provider_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "route_planner_provider_request_duration_seconds",
        "provider" => provider.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a destination that fell back to a straight line.
pub fn record_direct_fallback() {
    counter!("route_planner_direct_fallbacks_total").increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("route_planner_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_size(entries: usize) {
    gauge!("route_planner_cache_entries").set(entries as f64);
}

pub fn record_batch(destinations: usize, start: Instant) {
    histogram!("route_planner_batch_duration_seconds").record(start.elapsed().as_secs_f64());
    histogram!("route_planner_batch_destinations").record(destinations as f64);
}

pub fn record_http_request(path: &'static str, status: u16) {
    counter!(
        "route_planner_http_requests_total",
        "path" => path,
        "status" => status.to_string()
    )
    .increment(1);
}
