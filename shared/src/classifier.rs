//! Transaction classification from encoded call data
//!
//! The callback only carries the ABI-encoded USDC `transfer` call, so the
//! kind of checkout is recognised by looking for the hex encoding of the
//! transfer amount inside the call data. This is a plain substring match:
//! the amount word is never decoded.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::DataRequestPayload;

/// 0.01 USDC with 6 decimals (10_000 = 0x2710).
pub const GIVEAWAY_AMOUNT_HEX: &str = "2710";
/// 1 USDC with 6 decimals (1_000_000 = 0xf4240).
pub const PURCHASE_AMOUNT_HEX: &str = "f4240";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Unknown,
    Giveaway,
    Purchase,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Unknown => "unknown",
            TransactionType::Giveaway => "giveaway",
            TransactionType::Purchase => "purchase",
        }
    }

    /// Display label of the amount paid for this kind of transaction.
    pub fn amount_label(&self) -> &'static str {
        match self {
            TransactionType::Unknown => "0",
            TransactionType::Giveaway => "0.01 USDC",
            TransactionType::Purchase => "1 USDC",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionClassification {
    pub kind: TransactionType,
    pub amount: String,
}

impl TransactionClassification {
    fn of(kind: TransactionType) -> Self {
        Self {
            kind,
            amount: kind.amount_label().to_string(),
        }
    }

    pub fn unknown() -> Self {
        Self::of(TransactionType::Unknown)
    }
}

/// Classify a single call's encoded data. The giveaway pattern is checked
/// first, so data containing both substrings is a giveaway.
pub fn classify_call_data(data: &str) -> TransactionClassification {
    if data.contains(GIVEAWAY_AMOUNT_HEX) {
        TransactionClassification::of(TransactionType::Giveaway)
    } else if data.contains(PURCHASE_AMOUNT_HEX) {
        TransactionClassification::of(TransactionType::Purchase)
    } else {
        TransactionClassification::unknown()
    }
}

/// A call bundle whose first call cannot be inspected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("first call in the bundle is null")]
    NullCall,
    #[error("call data must be a string or an array, got {0}")]
    UnsupportedCallData(&'static str),
}

/// Classify a callback payload by the data of its first call.
///
/// A missing bundle, a call without `data`, or empty/zero/false data is an
/// unknown transaction. A `null` first call or data that is neither text
/// nor a list cannot be inspected and is an error. A list matches when one
/// of its items equals an amount pattern exactly.
pub fn classify(payload: &DataRequestPayload) -> Result<TransactionClassification, ClassifyError> {
    let data = match payload.first_call() {
        None => return Ok(TransactionClassification::unknown()),
        Some(Value::Null) => return Err(ClassifyError::NullCall),
        Some(Value::Object(call)) => call.get("data"),
        Some(_) => None,
    };

    match data {
        None => Ok(TransactionClassification::unknown()),
        Some(value) if is_blank(value) => Ok(TransactionClassification::unknown()),
        Some(Value::String(data)) => Ok(classify_call_data(data)),
        Some(Value::Array(items)) => Ok(classify_call_items(items)),
        Some(Value::Number(_)) => Err(ClassifyError::UnsupportedCallData("a number")),
        Some(Value::Bool(_)) => Err(ClassifyError::UnsupportedCallData("a boolean")),
        Some(_) => Err(ClassifyError::UnsupportedCallData("an object")),
    }
}

fn classify_call_items(items: &[Value]) -> TransactionClassification {
    let has = |pattern: &str| items.iter().any(|item| item.as_str() == Some(pattern));
    if has(GIVEAWAY_AMOUNT_HEX) {
        TransactionClassification::of(TransactionType::Giveaway)
    } else if has(PURCHASE_AMOUNT_HEX) {
        TransactionClassification::of(TransactionType::Purchase)
    } else {
        TransactionClassification::unknown()
    }
}

/// `null`, `false`, zero and the empty string carry no call data.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
