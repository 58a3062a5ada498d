use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    data_validation_handlers, handlers, metrics_handler, profile_verification_handlers,
    request_logger::request_logger, state::AppState,
};

pub const DATA_VALIDATION_PATH: &str = "/api/data-validation";
pub const PROFILE_VERIFICATION_PATH: &str = "/api/profile-verification";
pub const TEST_PATH: &str = "/api/test";

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn callback_routes() -> Router<AppState> {
    Router::new()
        .route(
            DATA_VALIDATION_PATH,
            get(data_validation_handlers::data_validation_status)
                .post(data_validation_handlers::validate_data)
                .options(handlers::cors_preflight),
        )
        .route(
            PROFILE_VERIFICATION_PATH,
            get(profile_verification_handlers::profile_verification_status)
                .post(profile_verification_handlers::verify_profile)
                .options(handlers::cors_preflight),
        )
}

pub fn diagnostic_routes() -> Router<AppState> {
    Router::new().route(
        TEST_PATH,
        get(handlers::test_status)
            .post(handlers::test_echo)
            .options(handlers::cors_preflight),
    )
}

/// Every response may be read cross-origin. Preflights are answered by
/// [`handlers::cors_preflight`] on each route.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(handlers::CORS_ALLOW_ORIGIN),
    )
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(callback_routes())
        .merge(diagnostic_routes())
        .merge(health_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(request_logger))
        .layer(allow_any_origin())
        .with_state(state)
}
