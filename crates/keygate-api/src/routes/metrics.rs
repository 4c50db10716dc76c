//! # Metrics Route
//!
//! Exposes the in-process request and verdict counters.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::middleware::metrics::MetricsSnapshot;
use crate::state::AppState;

/// Build the metrics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/metrics", get(metrics))
}

/// GET /v1/metrics — Return current counter values.
#[utoipa::path(
    get,
    path = "/v1/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Counter snapshot", body = MetricsSnapshot),
        (status = 401, description = "Missing or invalid API key", body = crate::error::ErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
