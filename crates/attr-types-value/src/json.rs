//! Conversion between `serde_json::Value` and [`Value`].
//!
//! JSON has no notion of ordered lists or file handles, so input arrays
//! arrive as bare [`Value::Sequence`]s and strings as [`Value::Str`]; turning
//! them into canonical values is the job of coercion. Output goes the other
//! way: lists become arrays and file handles become their path strings.

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::value::Value;

impl Value {
    /// Convert JSON input into the value model.
    ///
    /// Integers that fit in `i64` become [`Value::Int`]; every other number
    /// becomes [`Value::Num`].
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Undef,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Num(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::Sequence(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to JSON. Non-finite numbers become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Undef => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::Number((*i).into()),
            Value::Num(n) => Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Sequence(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<JsonMap<String, JsonValue>>(),
            ),
            Value::List(list) => JsonValue::Array(list.iter().map(Value::to_json).collect()),
            Value::File(file) => JsonValue::String(file.to_string()),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from_json(json)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::from_json(&json)
    }
}
