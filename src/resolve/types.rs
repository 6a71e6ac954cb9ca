//! Resolution result types

use crate::schema::ScalarKind;
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Value produced by resolving one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// Absent, explicitly null, or not coercible
    Null,
    Scalar(JsonValue),
    Object(JsonObject),
    List(Vec<JsonValue>),
}

impl Resolved {
    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }

    /// Convert into a plain JSON value
    pub fn into_value(self) -> JsonValue {
        match self {
            Resolved::Null => JsonValue::Null,
            Resolved::Scalar(value) => value,
            Resolved::Object(map) => JsonValue::Object(map),
            Resolved::List(items) => JsonValue::Array(items),
        }
    }

    pub fn as_scalar(&self) -> Option<&JsonValue> {
        match self {
            Resolved::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Resolved::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[JsonValue]> {
        match self {
            Resolved::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Coerce a leaf value to a scalar kind. Returns `None` when the value is
/// null or cannot be represented in that kind.
pub fn coerce_scalar(value: &JsonValue, kind: ScalarKind) -> Option<JsonValue> {
    match (kind, value) {
        (_, JsonValue::Null) => None,

        (ScalarKind::String, JsonValue::String(_)) => Some(value.clone()),
        (ScalarKind::String, JsonValue::Number(n)) => Some(JsonValue::String(n.to_string())),
        (ScalarKind::String, JsonValue::Bool(b)) => Some(JsonValue::String(b.to_string())),
        // Composite values under a string field (depth truncation, drifted
        // shapes) are passed through as JSON text.
        (ScalarKind::String, JsonValue::Array(_) | JsonValue::Object(_)) => {
            Some(JsonValue::String(value.to_string()))
        }

        (ScalarKind::Float, JsonValue::Number(_)) => Some(value.clone()),
        (ScalarKind::Float, JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number),
        (ScalarKind::Float, JsonValue::Bool(b)) => Some(JsonValue::from(if *b { 1.0 } else { 0.0 })),

        (ScalarKind::Boolean, JsonValue::Bool(_)) => Some(value.clone()),
        (ScalarKind::Boolean, JsonValue::Number(n)) => {
            n.as_f64().map(|f| JsonValue::Bool(f != 0.0))
        }
        (ScalarKind::Boolean, JsonValue::String(s)) => match s.as_str() {
            "true" => Some(JsonValue::Bool(true)),
            "false" => Some(JsonValue::Bool(false)),
            _ => None,
        },

        (ScalarKind::Float | ScalarKind::Boolean, JsonValue::Array(_) | JsonValue::Object(_)) => {
            None
        }
    }
}
