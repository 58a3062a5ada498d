//! Callback response envelopes
//!
//! The wallet provider accepts exactly two shapes on HTTP 200: a map of
//! field errors, or the echo of the request it should submit. The server
//! fault shape is produced by [`crate::error::CallbackError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{DataRequestPayload, EchoedRequest};

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallbackResponse {
    Rejected { errors: ValidationErrors },
    Accepted { request: EchoedRequest },
}

impl CallbackResponse {
    /// Rejection when any field failed, otherwise the request echo.
    pub fn from_validation(errors: ValidationErrors, payload: &DataRequestPayload) -> Self {
        if errors.has_errors() {
            CallbackResponse::Rejected { errors }
        } else {
            CallbackResponse::accepted(payload)
        }
    }

    pub fn accepted(payload: &DataRequestPayload) -> Self {
        CallbackResponse::Accepted {
            request: EchoedRequest::from(payload),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CallbackResponse::Accepted { .. })
    }
}

impl IntoResponse for CallbackResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
