//! Shared helpers for HTTP-level tests

#![allow(dead_code)]

pub use axum::body::Body;
pub use axum::http::{header, Method, Request, StatusCode};
pub use serde_json::{json, Value};
pub use tower::ServiceExt;

use api::config::ApiConfig;
use api::routes;
use api::state::AppState;

/// Router plus the state it runs on, so tests can inspect the store.
pub fn test_app() -> (axum::Router, AppState) {
    let state = AppState::standalone(ApiConfig::default());
    (routes::app(state.clone()), state)
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &axum::Router, uri: &str, body: impl Into<String>) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// ABI-encoded USDC transfer whose amount word is `amount_hex`.
pub fn transfer_call_data(amount_hex: &str) -> String {
    format!(
        "0xa9059cbb000000000000000000000000{}{:0>64}",
        "1111111111111111111111111111111111111111", amount_hex
    )
}

pub fn valid_requested_info() -> Value {
    json!({
        "email": "jane.doe@mail.org",
        "name": { "firstName": "Jane", "familyName": "Doe" },
        "physicalAddress": {
            "address1": "221B Baker Street",
            "city": "London",
            "postalCode": "NW16XE",
            "countryCode": "GB"
        },
        "phoneNumber": { "number": "+447700900123" }
    })
}
