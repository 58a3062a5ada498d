use axum::{extract::State, Json};
use serde_json::{json, Value};
use shared::{classify, DataRequestPayload};

use crate::{
    error::CallbackResult,
    handlers::timestamp,
    metrics,
    response::CallbackResponse,
    routes,
    state::AppState,
    validation::{CallbackJson, DataValidationRules, RuleSet},
};

/// Validate the data shared with a ticket purchase or giveaway entry.
///
/// Nothing is stored: on success the registration is only logged and the
/// provider gets the call bundle back to submit.
pub async fn validate_data(
    CallbackJson(payload): CallbackJson<DataRequestPayload>,
) -> CallbackResult<CallbackResponse> {
    let rules = DataValidationRules;
    let info = payload.requested_info();
    tracing::info!(
        user_address = payload.user_address(),
        email = ?info.and_then(|i| i.email.as_deref()),
        has_name = info.is_some_and(|i| i.name.is_some()),
        has_address = info.is_some_and(|i| i.physical_address.is_some()),
        has_phone = info.is_some_and(|i| i.phone_number.is_some()),
        "data validation callback received"
    );

    let classification = classify(&payload)?;
    metrics::observe_classification(classification.kind.as_str());
    tracing::info!(
        transaction_type = %classification.kind,
        amount = %classification.amount,
        "transaction classified"
    );

    let errors = rules.validate(&payload);
    metrics::observe_callback(rules.name(), errors.field_names());

    if errors.has_errors() {
        tracing::warn!(errors = ?errors, "validation errors found");
        return Ok(CallbackResponse::from_validation(errors, &payload));
    }

    tracing::info!(
        timestamp = %timestamp(),
        transaction_type = %classification.kind,
        amount = %classification.amount,
        user_address = payload.user_address(),
        email = ?info.and_then(|i| i.email.as_deref()),
        name = ?info.and_then(|i| i.name.as_ref()).map(|n| n.display_name()),
        "registration successful"
    );

    Ok(CallbackResponse::accepted(&payload))
}

pub async fn data_validation_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Data validation API is running",
        "publicUrl": state.config.public_base_url,
        "endpoint": routes::DATA_VALIDATION_PATH,
        "timestamp": timestamp(),
        "supportedMethods": ["GET", "POST", "OPTIONS"]
    }))
}
