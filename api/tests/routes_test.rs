//! Router-level tests: CORS, diagnostics, health, metrics, fallback

mod common;

use common::*;

#[tokio::test]
async fn test_options_returns_static_cors_headers() {
    let (app, _) = test_app();

    for uri in ["/api/data-validation", "/api/profile-verification", "/api/test"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_empty(), "{uri}");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}

#[tokio::test]
async fn test_browser_preflight_gets_same_answer() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/data-validation")
        .header(header::ORIGIN, "https://wallet.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
    assert_eq!(headers.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(), 1);
}

#[tokio::test]
async fn test_post_responses_allow_any_origin() {
    let (app, _) = test_app();
    let request = Request::post("/api/data-validation")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (_, headers, _) = send(&app, request).await;

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_test_endpoint_echoes_body() {
    let (app, _) = test_app();
    let (status, body) = post_json(&app, "/api/test", json!({ "ping": [1, 2, 3] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["receivedData"], json!({ "ping": [1, 2, 3] }));
}

#[tokio::test]
async fn test_test_endpoint_lists_callbacks() {
    let (app, _) = test_app();
    let (_, body) = get_json(&app, "/api/test").await;

    assert_eq!(body["endpoints"]["dataValidation"], "/api/data-validation");
    assert_eq!(body["endpoints"]["profileVerification"], "/api/profile-verification");
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_after_callback() {
    let (app, _) = test_app();
    post_json(&app, "/api/data-validation", json!({ "calls": [] })).await;

    let request = Request::get("/metrics").body(Body::empty()).unwrap();
    let (status, _, body) = send(&app, request).await;
    let text = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("callbacks_total"));
    assert!(text.contains("transactions_classified_total"));
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = test_app();
    let (status, body) = get_json(&app, "/api/tickets").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));
}
