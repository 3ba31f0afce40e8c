//! Loosely shaped input records and the field-alias table used to read them.
//!
//! Remote rows have drifted over time (`date`/`data`, `description`/`desc`,
//! `receipt`/`receipt_url`). Each canonical field lists the keys it may
//! arrive under; the first key holding a present value wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical fields of a [`crate::Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Date,
    Category,
    Amount,
    Description,
    Type,
    Receipt,
}

/// Ordered alias keys per canonical field. Adding an alias is a one-line change.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Id, &["id"]),
    (Field::Date, &["date", "data"]),
    (Field::Category, &["category"]),
    (Field::Amount, &["amount"]),
    (Field::Description, &["description", "desc"]),
    (Field::Type, &["type"]),
    (Field::Receipt, &["receipt", "receipt_url"]),
];

impl Field {
    /// Keys this field may be stored under, in resolution order
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, keys)| *keys)
            .unwrap_or(&[])
    }

    /// Preferred key when writing a record
    pub fn key(self) -> &'static str {
        self.aliases().first().copied().unwrap_or("")
    }
}

/// Untyped pre-normalization record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(Map<String, Value>);

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Builder pattern: set `key` to `value`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw lookup by exact key
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Resolve a canonical field through its aliases, first present wins.
    /// Null and blank strings count as absent.
    pub fn get(&self, field: Field) -> Option<&Value> {
        field
            .aliases()
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| is_present(value))
    }

    /// Resolve a field as trimmed text; numbers are rendered, other shapes ignored.
    pub fn text(&self, field: Field) -> Option<String> {
        match self.get(field)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
