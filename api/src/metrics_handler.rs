use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::metrics;
use crate::state::AppState;

/// Prometheus text exposition format, version 0.0.4.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Scrape target for callback, registration and HTTP metrics.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    let body = metrics::gather_metrics(&state.registry);
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response()
}
