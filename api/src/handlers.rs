use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::{routes, state::AppState, validation::CallbackJson};

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Static preflight answer shared by every callback route.
pub async fn cors_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN),
            (header::ACCESS_CONTROL_ALLOW_METHODS, CORS_ALLOW_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS),
        ],
    )
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    tracing::debug!(uptime_secs = uptime, "health check");

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": timestamp(),
            "uptime_secs": uptime
        })),
    )
}

/// Connectivity check for the tunnel / wallet setup.
pub async fn test_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Test endpoint is working!",
        "publicUrl": state.config.public_base_url,
        "endpoints": {
            "test": routes::TEST_PATH,
            "dataValidation": routes::DATA_VALIDATION_PATH,
            "profileVerification": routes::PROFILE_VERIFICATION_PATH
        },
        "timestamp": timestamp()
    }))
}

/// Echo whatever JSON was posted.
pub async fn test_echo(CallbackJson(body): CallbackJson<Value>) -> Json<Value> {
    tracing::debug!(body = %body, "test endpoint received POST");
    Json(json!({
        "status": "OK",
        "message": "POST request received successfully!",
        "receivedData": body,
        "timestamp": timestamp()
    }))
}

pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}
