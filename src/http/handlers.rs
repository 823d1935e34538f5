//! Route and health handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::RoutingError;
use crate::worker::{WorkerRequest, WorkerResponse};

pub const ROUTES_PATH: &str = "/api/v1/routes";
pub const HEALTH_PATH: &str = "/health";

/// `POST /api/v1/routes`: one batch through the worker.
pub async fn calculate_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<WorkerRequest>, JsonRejection>,
) -> Response {
    let request_id = request_id(&headers).to_string();

    let (status, body) = match payload {
        Err(rejection) => {
            tracing::warn!(request_id = %request_id, error = %rejection, "Undecodable route request");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            let message = RoutingError::MalformedRequest(rejection.body_text()).to_string();
            (status, WorkerResponse::Error { message })
        }
        Ok(Json(request)) => match state.worker.submit(request).await {
            Ok(route_results) => {
                tracing::debug!(request_id = %request_id, routes = route_results.len(), "Routes calculated");
                (StatusCode::OK, WorkerResponse::Success { route_results })
            }
            Err(e) => {
                let status = match e {
                    RoutingError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
                    RoutingError::WorkerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                tracing::warn!(request_id = %request_id, error = %e, status = status.as_u16(), "Route request failed");
                (status, WorkerResponse::Error { message: e.to_string() })
            }
        },
    };

    metrics::record_http_request(ROUTES_PATH, status.as_u16());
    (status, Json(body)).into_response()
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let (status, label) = if state.worker.is_running() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };
    metrics::record_http_request(HEALTH_PATH, status.as_u16());
    (
        status,
        Json(HealthBody {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
        .into_response()
}
