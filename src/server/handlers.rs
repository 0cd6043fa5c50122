use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;

use crate::geocode::{GeocodeError, LookupResult};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── GET /api/reverse, /api/address ──────────────────────────────

#[derive(Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lon: f64,
}

pub async fn reverse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQuery>,
) -> Response {
    let start = Instant::now();
    let geocoder = state.geocoder.clone();
    let (lat, lon) = (params.lat, params.lon);
    let outcome = tokio::task::spawn_blocking(move || geocoder.reverse_geocode(lat, lon)).await;
    respond("/api/reverse", &params, start, outcome)
}

pub async fn address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQuery>,
) -> Response {
    let start = Instant::now();
    let geocoder = state.geocoder.clone();
    let (lat, lon) = (params.lat, params.lon);
    let outcome =
        tokio::task::spawn_blocking(move || geocoder.reverse_geocode_detailed(lat, lon)).await;
    respond("/api/address", &params, start, outcome)
}

fn respond<T: Serialize>(
    route: &str,
    params: &ReverseQuery,
    start: Instant,
    outcome: Result<Result<LookupResult<T>, GeocodeError>, JoinError>,
) -> Response {
    let ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(Ok(LookupResult::Found(body))) => {
            info!("GET {} lat={} lon={} -> 200 ({:.1}ms)", route, params.lat, params.lon, ms);
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(Ok(LookupResult::Failed(err))) => {
            info!(
                "GET {} lat={} lon={} -> upstream {} ({:.1}ms)",
                route, params.lat, params.lon, err.error, ms
            );
            (StatusCode::BAD_GATEWAY, Json(err)).into_response()
        }
        Ok(Err(e)) => {
            info!("GET {} lat={} lon={} -> {} ({:.1}ms)", route, params.lat, params.lon, e, ms);
            api_error(StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
        Err(e) => {
            error!("GET {} lookup task failed: {}", route, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Lookup task failed").into_response()
        }
    }
}
