//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate provider URLs and socket addresses
//! - Validate value ranges (timeouts > 0, capacities > 0, finite costs)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PlannerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::PlannerConfig;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid provider URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("providers: at least one routing provider must be configured")]
    NoProviders,

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field}: must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &PlannerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_nonzero(&mut errors, "listener.request_timeout_secs", config.listener.request_timeout_secs as usize);
    check_nonzero(&mut errors, "listener.max_body_bytes", config.listener.max_body_bytes);

    let valhalla = config
        .providers
        .valhalla_url
        .as_deref()
        .filter(|url| !url.is_empty());
    if config.providers.osrm_urls.is_empty() && valhalla.is_none() {
        errors.push(ValidationError::NoProviders);
    }
    for url in &config.providers.osrm_urls {
        check_url(&mut errors, "providers.osrm_urls", url);
    }
    if let Some(url) = valhalla {
        check_url(&mut errors, "providers.valhalla_url", url);
    }
    check_nonzero(&mut errors, "providers.timeout_secs", config.providers.timeout_secs as usize);

    check_nonzero(&mut errors, "cache.capacity", config.cache.capacity);
    check_nonzero(&mut errors, "cache.ttl_secs", config.cache.ttl_secs as usize);

    check_positive(&mut errors, "costs.fuel_liters_per_km", config.costs.fuel_liters_per_km);
    check_positive(&mut errors, "costs.price_per_liter", config.costs.price_per_liter);
    check_positive(&mut errors, "costs.direct_minutes_per_km", config.costs.direct_minutes_per_km);

    check_nonzero(&mut errors, "worker.queue_depth", config.worker.queue_depth);

    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_nonzero(errors: &mut Vec<ValidationError>, field: &'static str, value: usize) {
    if value == 0 {
        errors.push(ValidationError::Zero { field });
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ValidationError::NotPositive { field, value });
    }
}
