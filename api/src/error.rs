use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use shared::ClassifyError;

use crate::store::StoreError;

pub const SERVER_ERROR_MESSAGE: &str = "Server error validating data";

/// A fault while processing a callback (unreadable body, store failure).
///
/// Rendered as `{"errors": {"server": ..., "details": ...}}` with status 200:
/// the wallet provider branches on the body, never on the status code.
#[derive(Debug)]
pub struct CallbackError {
    details: String,
}

#[derive(Debug, Serialize)]
struct ServerErrorBody<'a> {
    errors: ServerErrorDetails<'a>,
}

#[derive(Debug, Serialize)]
struct ServerErrorDetails<'a> {
    server: &'static str,
    details: &'a str,
}

impl CallbackError {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

impl From<StoreError> for CallbackError {
    fn from(err: StoreError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ClassifyError> for CallbackError {
    fn from(err: ClassifyError) -> Self {
        Self::new(err.to_string())
    }
}

impl std::fmt::Display for CallbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", SERVER_ERROR_MESSAGE, self.details)
    }
}

impl std::error::Error for CallbackError {}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        tracing::error!(
            correlation_id = %correlation_id,
            details = %self.details,
            "callback processing failed"
        );
        crate::metrics::SERVER_ERRORS_TOTAL.inc();

        let payload = ServerErrorBody {
            errors: ServerErrorDetails {
                server: SERVER_ERROR_MESSAGE,
                details: &self.details,
            },
        };

        let mut response = (StatusCode::OK, Json(payload)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

pub type CallbackResult<T> = std::result::Result<T, CallbackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_server_error_envelope() {
        let response = CallbackError::new("boom").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-correlation-id"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            json!({ "errors": { "server": "Server error validating data", "details": "boom" } })
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: CallbackError = StoreError::Unavailable("disk full".into()).into();
        assert!(err.details().contains("disk full"));
    }

    #[test]
    fn test_classify_error_conversion() {
        let err: CallbackError = ClassifyError::NullCall.into();
        assert_eq!(err.details(), "first call in the bundle is null");
    }
}
