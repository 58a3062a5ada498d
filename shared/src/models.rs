use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════
// CALLBACK PAYLOAD
// ═══════════════════════════════════════════════════════════════════════════

/// Body posted by the wallet provider once the user approved the payment
/// call bundle together with the data-sharing request.
///
/// `calls`, `chainId` and `version` stay raw JSON: they are echoed back
/// verbatim and a key missing here must stay missing in the echo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequestPayload {
    #[serde(default)]
    pub requested_info: Option<RequestedInfo>,
    #[serde(default, deserialize_with = "present")]
    pub calls: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub chain_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub version: Option<Value>,
    #[serde(default)]
    pub from: Option<String>,
}

impl DataRequestPayload {
    /// Wallet address used as the registration key, `"unknown"` when the
    /// provider did not send one.
    pub fn user_address(&self) -> &str {
        match self.from.as_deref() {
            Some(from) if !from.is_empty() => from,
            _ => "unknown",
        }
    }

    /// First entry of the call bundle as sent, `None` when `calls` is
    /// missing, not an array, or empty.
    pub fn first_call(&self) -> Option<&Value> {
        self.calls.as_ref()?.as_array()?.first()
    }

    pub fn requested_info(&self) -> Option<&RequestedInfo> {
        self.requested_info.as_ref()
    }
}

/// Distinguishes an explicit `null` (kept as `Some(Value::Null)`) from a
/// missing key (left as `None` by `#[serde(default)]`).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Personal data the wallet collected on behalf of the dapp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<PhysicalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
}

impl RequestedInfo {
    /// The email, treating an empty string the same as no email at all.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

impl PersonName {
    /// "First Family" as shown in registration summaries.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.family_name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// CALLBACK RESPONSES
// ═══════════════════════════════════════════════════════════════════════════

/// The three fields of the original request the provider expects back on
/// success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

impl From<&DataRequestPayload> for EchoedRequest {
    fn from(payload: &DataRequestPayload) -> Self {
        Self {
            calls: payload.calls.clone(),
            chain_id: payload.chain_id.clone(),
            version: payload.version.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REGISTRATIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Profile data kept for a wallet address after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub user_address: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<PhysicalAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
}

impl RegistrationRecord {
    pub fn from_payload(payload: &DataRequestPayload, timestamp: DateTime<Utc>) -> Self {
        let info = payload.requested_info().cloned().unwrap_or_default();
        Self {
            user_address: payload.user_address().to_string(),
            timestamp,
            email: info.email,
            name: info.name,
            physical_address: info.physical_address,
            phone_number: info.phone_number,
        }
    }
}
