//! Meta payload helpers and policy rules.
//!
//! Meta payloads travel as free-form key/value objects but are hashed
//! and stored as a list of `{key, value}` entries; [`normalize`] does
//! that flattening. [`Rule`] models a single policy condition attached
//! to a meta asset; all three of its parts are structural preconditions
//! checked at construction.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::MetaError;

/// Comparison operator in a policy rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

/// A single meta policy condition: `key <comparison> value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub value: Value,
    pub comparison: Comparison,
}

impl Rule {
    /// Build a rule, validating the structural preconditions.
    ///
    /// The key must be non-empty and the value must not be the absent
    /// marker; a missing part fails with
    /// [`MetaError::MissingRequiredField`] immediately rather than at
    /// evaluation time.
    pub fn new(
        key: impl Into<String>,
        value: Value,
        comparison: Comparison,
    ) -> Result<Self, MetaError> {
        let key = key.into();
        if key.is_empty() {
            return Err(MetaError::MissingRequiredField { field: "key" });
        }
        if value.is_null() {
            return Err(MetaError::MissingRequiredField { field: "value" });
        }
        Ok(Self {
            key,
            value,
            comparison,
        })
    }

    /// Parse a rule from its wire object form.
    pub fn from_value(source: &Value) -> Result<Self, MetaError> {
        let map = source.as_object().ok_or(MetaError::NotAnObject)?;
        let key = map
            .get("key")
            .and_then(Value::as_str)
            .ok_or(MetaError::MissingRequiredField { field: "key" })?;
        let value = map
            .get("value")
            .filter(|v| !v.is_null())
            .ok_or(MetaError::MissingRequiredField { field: "value" })?;
        let comparison = map
            .get("comparison")
            .filter(|v| !v.is_null())
            .ok_or(MetaError::MissingRequiredField { field: "comparison" })?;
        let comparison: Comparison = serde_json::from_value(comparison.clone())
            .map_err(|_| MetaError::MissingRequiredField { field: "comparison" })?;
        Self::new(key, value.clone(), comparison)
    }
}

/// Flatten a key/value meta object into the wire list of
/// `{key, value}` entries, in byte-wise key order.
///
/// An input that is already a list passes through unchanged.
pub fn normalize(meta: &Value) -> Result<Value, MetaError> {
    match meta {
        Value::Array(_) => Ok(meta.clone()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            let entries = keys
                .into_iter()
                .map(|key| json!({"key": key, "value": map[key]}))
                .collect();
            Ok(Value::Array(entries))
        }
        _ => Err(MetaError::NotAnObject),
    }
}

/// Aggregate a list of rules into the meta value stored under an `R`
/// isotope's payload.
pub fn rules_to_meta(rules: &[Rule]) -> Result<Value, MetaError> {
    let encoded = serde_json::to_value(rules).map_err(|_| MetaError::NotAnObject)?;
    Ok(json!({"rules": encoded}))
}
