//! Generic JSON envelope: parse status plus access to the raw tree.
//!
//! [`JsonEnvelope`] is the capability the search-specific
//! [`ResponseEnvelope`](crate::envelope::ResponseEnvelope) embeds. It never
//! fails to construct; an unparsable payload becomes a permanent
//! not-well-formed state backed by `Value::Null`.

use log::warn;
use serde_json::{Map, Value};

use crate::error::{ResponseError, Result};

/// A parsed JSON payload and whether it was structurally an object.
#[derive(Debug, Clone)]
pub struct JsonEnvelope {
    raw: Value,
    well_formed: bool,
}

impl JsonEnvelope {
    /// Parse a payload, recording failure instead of returning it.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                warn!("Response payload is not parseable JSON: {}", e);
                JsonEnvelope {
                    raw: Value::Null,
                    well_formed: false,
                }
            }
        }
    }

    /// Parse a payload, failing if it is not JSON or not an object.
    pub fn parse_strict(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ResponseError::not_well_formed(format!(
                "expected a JSON object at the top level, found {}",
                type_name(&value)
            )));
        }
        Ok(Self::from_value(value))
    }

    /// Wrap an already parsed tree.
    pub fn from_value(value: Value) -> Self {
        let well_formed = value.is_object();
        if !well_formed {
            warn!(
                "Response payload is a JSON {}, not an object",
                type_name(&value)
            );
        }
        JsonEnvelope {
            raw: value,
            well_formed,
        }
    }

    /// True iff the payload parsed as a JSON object.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// The raw tree (`Value::Null` when the payload did not parse).
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The top-level object, if well-formed.
    pub fn root(&self) -> Option<&Map<String, Value>> {
        self.raw.as_object()
    }

    /// Walk a path of object keys from the root.
    pub fn path(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .try_fold(&self.raw, |value, key| value.as_object()?.get(*key))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let envelope = JsonEnvelope::parse(r#"{"a": {"b": 1}}"#);
        assert!(envelope.is_well_formed());
        assert_eq!(envelope.path(&["a", "b"]), Some(&json!(1)));
        assert_eq!(envelope.path(&["a", "c"]), None);
        assert_eq!(envelope.path(&["a", "b", "c"]), None);
    }

    #[test]
    fn test_parse_garbage() {
        let envelope = JsonEnvelope::parse("{\"response\": ");
        assert!(!envelope.is_well_formed());
        assert!(envelope.raw().is_null());
        assert!(envelope.root().is_none());
        assert_eq!(envelope.path(&["response"]), None);
    }

    #[test]
    fn test_non_object_is_not_well_formed() {
        let envelope = JsonEnvelope::parse("[1, 2, 3]");
        assert!(!envelope.is_well_formed());
        assert_eq!(envelope.raw(), &json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_strict() {
        assert!(JsonEnvelope::parse_strict(r#"{"ok": true}"#).is_ok());

        match JsonEnvelope::parse_strict("\"just a string\"") {
            Err(ResponseError::NotWellFormed(msg)) => assert!(msg.contains("string")),
            other => panic!("Expected NotWellFormed, got {:?}", other),
        }

        match JsonEnvelope::parse_strict("{") {
            Err(ResponseError::Json(_)) => {}
            other => panic!("Expected Json error, got {:?}", other),
        }
    }
}
