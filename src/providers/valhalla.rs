//! Valhalla-compatible routing client.
//!
//! `POST {endpoint}` with `{locations: [{lat, lon}, ...], costing, shape_match, format}`
//! answering `{trip: {legs: [{shape, summary: {length, time}}]}}`, where `shape`
//! is an encoded polyline, `length` is kilometers and `time` is seconds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use url::Url;

use crate::geo::polyline::{decode_polyline_with_precision, DEFAULT_PRECISION};
use crate::model::Coordinate;
use crate::providers::types::{ProviderError, ProviderResult, ProviderRoute};
use crate::providers::RouteProvider;

const PROVIDER_NAME: &str = "Valhalla";

#[derive(Debug, Serialize)]
struct ValhallaRequest {
    locations: [ValhallaLocation; 2],
    costing: &'static str,
    shape_match: &'static str,
    format: &'static str,
}

#[derive(Debug, Serialize)]
struct ValhallaLocation {
    lat: f64,
    lon: f64,
}

impl From<Coordinate> for ValhallaLocation {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.latitude,
            lon: c.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValhallaResponse {
    trip: Option<ValhallaTrip>,
}

#[derive(Debug, Deserialize)]
struct ValhallaTrip {
    #[serde(default)]
    legs: Vec<ValhallaLeg>,
}

#[derive(Debug, Deserialize)]
struct ValhallaLeg {
    shape: String,
    summary: ValhallaSummary,
}

#[derive(Debug, Deserialize)]
struct ValhallaSummary {
    /// Kilometers.
    length: f64,
    /// Seconds.
    time: f64,
}

/// Client for a Valhalla `route` endpoint.
#[derive(Debug, Clone)]
pub struct ValhallaProvider {
    client: Client,
    endpoint: Url,
    timeout: Duration,
    shape_precision: u32,
}

impl ValhallaProvider {
    pub fn new(client: Client, endpoint: Url, timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            timeout,
            shape_precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_shape_precision(mut self, precision: u32) -> Self {
        self.shape_precision = precision;
        self
    }

    async fn fetch(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        let payload = ValhallaRequest {
            locations: [start.into(), end.into()],
            costing: "auto",
            shape_match: "edge_walk",
            format: "json",
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_route(&body, self.shape_precision)
    }
}

#[async_trait]
impl RouteProvider for ValhallaProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn route(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        match timeout(self.timeout, self.fetch(start, end)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

/// Take the first leg of a Valhalla trip and decode its shape.
fn parse_route(body: &[u8], precision: u32) -> ProviderResult<ProviderRoute> {
    let decoded: ValhallaResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::Decode(format!("invalid Valhalla JSON payload: {e}")))?;

    let leg = decoded
        .trip
        .and_then(|trip| trip.legs.into_iter().next())
        .ok_or(ProviderError::NoRoute)?;

    let geometry = decode_polyline_with_precision(&leg.shape, precision)?;
    Ok(ProviderRoute::new(
        geometry,
        leg.summary.length * 1000.0,
        leg.summary.time,
    ))
}
