//! Custom Axum extractor for wallet callback bodies
//!
//! `CallbackJson<T>` parses the body as JSON whatever the declared
//! `Content-Type`. A body that cannot be read or deserialized is rejected
//! with the callback server-error envelope (still HTTP 200) instead of
//! axum's plain-text 4xx.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::CallbackError;

pub struct CallbackJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CallbackJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CallbackError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| CallbackError::new(format!("Failed to read request body: {}", err.body_text())))?;

        let data = serde_json::from_slice::<T>(&body)
            .map_err(|err| CallbackError::new(err.to_string()))?;

        Ok(CallbackJson(data))
    }
}

impl<T> std::ops::Deref for CallbackJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::Value;

    async fn extract(body: &'static str) -> Result<Value, CallbackError> {
        let req = axum::http::Request::builder().body(Body::from(body)).unwrap();
        CallbackJson::<Value>::from_request(req, &()).await.map(|CallbackJson(v)| v)
    }

    #[tokio::test]
    async fn test_parses_without_content_type() {
        let value = extract(r#"{"chainId":84532}"#).await.unwrap();
        assert_eq!(value["chainId"], 84532);
    }

    #[tokio::test]
    async fn test_syntax_error_becomes_callback_error() {
        let err = extract("{not json").await.unwrap_err();
        assert!(err.details().contains("key must be a string"), "{}", err.details());
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let err = extract("").await.unwrap_err();
        assert!(err.details().contains("EOF"), "{}", err.details());
    }
}
