use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use shared::{DataRequestPayload, RegistrationRecord};

use crate::{
    error::CallbackResult,
    handlers::timestamp,
    metrics,
    response::CallbackResponse,
    routes,
    state::AppState,
    validation::{CallbackJson, ProfileVerificationRules, RuleSet},
};

/// Verify a profile submission and remember it under the wallet address.
pub async fn verify_profile(
    State(state): State<AppState>,
    CallbackJson(payload): CallbackJson<DataRequestPayload>,
) -> CallbackResult<CallbackResponse> {
    let rules = ProfileVerificationRules;
    let user_address = payload.user_address();
    tracing::info!(
        user_address,
        has_requested_info = payload.requested_info().is_some(),
        "profile verification callback received"
    );

    let errors = rules.validate(&payload);
    metrics::observe_callback(rules.name(), errors.field_names());

    if errors.has_errors() {
        tracing::warn!(user_address, errors = ?errors, "validation errors found");
        return Ok(CallbackResponse::from_validation(errors, &payload));
    }

    let record = RegistrationRecord::from_payload(&payload, Utc::now());
    let replaced = state.store.upsert(user_address, record).await?;
    metrics::REGISTRATION_WRITES.inc();

    let total = state.store.count().await?;
    metrics::REGISTRATIONS_STORED.set(i64::try_from(total).unwrap_or(i64::MAX));
    tracing::info!(
        user_address,
        overwritten = replaced.is_some(),
        total_registrations = total,
        "registration stored"
    );

    Ok(CallbackResponse::accepted(&payload))
}

pub async fn profile_verification_status(State(state): State<AppState>) -> CallbackResult<Json<Value>> {
    let total = state.store.count().await?;

    Ok(Json(json!({
        "status": "OK",
        "message": "Profile verification API is running",
        "totalRegistrations": total,
        "endpoint": routes::PROFILE_VERIFICATION_PATH,
        "timestamp": timestamp()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn valid_body(from: &str, email: &str) -> DataRequestPayload {
        serde_json::from_value(json!({
            "requestedInfo": {
                "email": email,
                "name": { "firstName": "Jane", "familyName": "Doe" },
                "physicalAddress": { "address1": "1 Main St", "postalCode": "10001", "countryCode": "US" }
            },
            "calls": [{ "data": "0x2710" }],
            "chainId": 84532,
            "version": "1.0",
            "from": from
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_resubmission_overwrites() {
        let state = AppState::standalone(ApiConfig::default());

        for email in ["first@mail.org", "second@mail.org"] {
            let response = verify_profile(State(state.clone()), CallbackJson(valid_body("0xabc", email)))
                .await
                .unwrap();
            assert!(response.is_accepted());
        }

        assert_eq!(state.store.count().await.unwrap(), 1);
        let stored = state.store.get("0xabc").await.unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("second@mail.org"));
        assert_eq!(stored.user_address, "0xabc");
    }

    #[tokio::test]
    async fn test_rejection_stores_nothing() {
        let state = AppState::standalone(ApiConfig::default());
        let response = verify_profile(State(state.clone()), CallbackJson(valid_body("0xabc", "a@example.com")))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "errors": { "email": "Example.com emails are not allowed" } })
        );
        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_from_keys_unknown() {
        let state = AppState::standalone(ApiConfig::default());
        let payload: DataRequestPayload = serde_json::from_value(json!({ "calls": [] })).unwrap();
        verify_profile(State(state.clone()), CallbackJson(payload)).await.unwrap();

        assert!(state.store.get("unknown").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_status_reports_total() {
        let state = AppState::standalone(ApiConfig::default());
        verify_profile(State(state.clone()), CallbackJson(valid_body("0x1", "a@mail.org")))
            .await
            .unwrap();
        verify_profile(State(state.clone()), CallbackJson(valid_body("0x2", "b@mail.org")))
            .await
            .unwrap();

        let Json(body) = profile_verification_status(State(state)).await.unwrap();
        assert_eq!(body["totalRegistrations"], 2);
        assert_eq!(body["endpoint"], "/api/profile-verification");
    }
}
