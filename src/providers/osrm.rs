//! OSRM-compatible routing client.
//!
//! `GET {base}/{lng},{lat};{lng},{lat}?overview=full&geometries=geojson`
//! answering `{routes: [{geometry: {coordinates: [[lng, lat], ...]}, distance, duration}]}`
//! with distance in meters and duration in seconds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::timeout;
use url::Url;

use crate::model::Coordinate;
use crate::providers::types::{ProviderError, ProviderResult, ProviderRoute};
use crate::providers::RouteProvider;

const PROVIDER_NAME: &str = "OSRM";

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Client for one OSRM mirror.
#[derive(Debug, Clone)]
pub struct OsrmProvider {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl OsrmProvider {
    pub fn new(client: Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// Full request URL for one start/end pair.
    pub fn request_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url.as_str().trim_end_matches('/'),
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude,
        )
    }

    async fn fetch(&self, start: Coordinate, end: Coordinate) -> ProviderResult<ProviderRoute> {
        let response = self
            .client
            .get(self.request_url(start, end))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_route(&body)
    }
}

#[async_trait]
impl RouteProvider for OsrmProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn endpoint(&self) -> &str {
        self.base_url.as_str()
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

/// Take the first route of an OSRM response body.
fn parse_route(body: &[u8]) -> ProviderResult<ProviderRoute> {
    let decoded: OsrmResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::Decode(format!("invalid OSRM JSON payload: {e}")))?;

    let route = decoded.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;
    let geometry: Vec<Coordinate> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| Coordinate::new(lat, lng))
        .collect();

    Ok(ProviderRoute::new(geometry, route.distance, route.duration))
}
