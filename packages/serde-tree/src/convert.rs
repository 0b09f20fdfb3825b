//! Conversions between Value trees, JSON, and serde types.

use std::sync::Arc;

use base64::Engine;
use objpath_core::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Error;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    serde_json::from_value(value_to_json(value)).map_err(Error::Decode)
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize + ?Sized>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(Error::Encode)?;
    Ok(json_to_value(json))
}

/// Parse JSON text into a Value tree.
///
/// ```rust
/// use objpath_core::{get, PathContext, Value};
/// use objpath_serde::parse_json;
///
/// let tree = parse_json(r#"{"servers": [{"port": 80}]}"#).unwrap();
/// let ctx = PathContext::default();
/// assert_eq!(get(&tree, "servers/0/port", &ctx), Some(&Value::Integer(80)));
/// ```
pub fn parse_json(text: &str) -> Result<Value, Error> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(Error::Parse)?;
    Ok(json_to_value(json))
}

/// Render a Value tree as compact JSON text.
pub fn to_json_string(value: &Value) -> String {
    value_to_json(value).to_string()
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => {
            // JSON doesn't have bytes, so we base64 encode
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(|item| value_to_json(item)).collect())
        }
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(|item| Arc::new(json_to_value(item)))
                .collect(),
        ),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, Arc::new(json_to_value(v))))
                .collect(),
        ),
    }
}
