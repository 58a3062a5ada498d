//! Accumulator for field-level validation failures
//!
//! Failures are keyed by field name. Compound fields (`name`,
//! `physicalAddress`, `phoneNumber`) hold a nested map of leaf messages.
//! Writing a key that already holds a message replaces it in place, so the
//! last rule checked for a field wins and keys keep their first-insertion
//! order when serialized.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single field failure: either a message or a map of leaf messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFailure {
    Message(String),
    Nested(FieldMessages),
}

impl Serialize for FieldFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldFailure::Message(message) => serializer.serialize_str(message),
            FieldFailure::Nested(leaves) => leaves.serialize(serializer),
        }
    }
}

/// Insertion-ordered leaf → message map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMessages {
    entries: Vec<(String, String)>,
}

impl FieldMessages {
    pub fn set(&mut self, leaf: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(key, _)| key == leaf) {
            Some((_, existing)) => *existing = message,
            None => self.entries.push((leaf.to_string(), message)),
        }
    }

    pub fn get(&self, leaf: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == leaf)
            .map(|(_, message)| message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMessages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (leaf, message) in &self.entries {
            map.serialize_entry(leaf, message)?;
        }
        map.end()
    }
}

/// Every failure found while validating one callback. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, FieldFailure)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a scalar field, replacing any earlier one.
    pub fn set(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        let failure = FieldFailure::Message(message.into());
        match self.fields.iter_mut().find(|(key, _)| key == field) {
            Some((_, existing)) => *existing = failure,
            None => self.fields.push((field.to_string(), failure)),
        }
        self
    }

    /// Record a message for one leaf of a compound field.
    pub fn set_nested(&mut self, field: &str, leaf: &str, message: impl Into<String>) -> &mut Self {
        let position = match self.fields.iter().position(|(key, _)| key == field) {
            Some(position) => position,
            None => {
                self.fields
                    .push((field.to_string(), FieldFailure::Nested(FieldMessages::default())));
                self.fields.len() - 1
            }
        };

        let slot = &mut self.fields[position].1;
        if let FieldFailure::Message(_) = slot {
            *slot = FieldFailure::Nested(FieldMessages::default());
        }
        if let FieldFailure::Nested(leaves) = slot {
            leaves.set(leaf, message);
        }
        self
    }

    /// Record `message` for a scalar field when `failed` holds.
    pub fn check(&mut self, failed: bool, field: &str, message: &str) -> &mut Self {
        if failed {
            self.set(field, message);
        }
        self
    }

    /// Record `message` for a leaf of a compound field when `failed` holds.
    pub fn check_nested(&mut self, failed: bool, field: &str, leaf: &str, message: &str) -> &mut Self {
        if failed {
            self.set_nested(field, leaf, message);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldFailure> {
        self.fields
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, failure)| failure)
    }

    /// Message for a scalar field, or for `field.leaf` when given a leaf.
    pub fn message(&self, field: &str, leaf: Option<&str>) -> Option<&str> {
        match (self.get(field)?, leaf) {
            (FieldFailure::Message(message), None) => Some(message.as_str()),
            (FieldFailure::Nested(leaves), Some(leaf)) => leaves.get(leaf),
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of top-level fields that failed.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, failure) in &self.fields {
            map.serialize_entry(field, failure)?;
        }
        map.end()
    }
}
