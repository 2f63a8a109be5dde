//! Best-effort coercion of string arguments to their declared primitive type.
//!
//! LLM callers routinely send `"10"` for an integer or `"yes"` for a flag.
//! Coercion only ever rewrites *string* values of properties declared as
//! `integer`, `number` or `boolean`. When a string cannot be converted it is
//! left untouched, and the validator reports the type mismatch.

use serde_json::{Map, Number, Value};

use crate::schema::{self, PropertyType};

/// Strings accepted as `true` (after lower-casing).
const TRUTHY: &[&str] = &["true", "1", "yes", "on"];
/// Strings accepted as `false` (after lower-casing).
const FALSY: &[&str] = &["false", "0", "no", "off"];

/// Return a copy of `args` with declared scalar properties coerced.
///
/// Keys absent from `schema.properties` are copied as-is, so the result
/// always has exactly the keys of the input.
#[must_use]
pub fn coerce_arguments(args: &Map<String, Value>, schema: &Value) -> Map<String, Value> {
    let Some(properties) = schema::properties(schema) else {
        return args.clone();
    };

    args.iter()
        .map(|(key, value)| {
            let coerced = properties
                .get(key)
                .and_then(PropertyType::of_property)
                .and_then(|ty| coerce_value(value, ty))
                .unwrap_or_else(|| value.clone());
            (key.clone(), coerced)
        })
        .collect()
}

/// Coerce a single value. `None` means "leave it as it is".
#[must_use]
pub fn coerce_value(value: &Value, declared: PropertyType) -> Option<Value> {
    let Value::String(s) = value else {
        return None;
    };

    match declared {
        PropertyType::Integer => parse_integer(s),
        PropertyType::Number => parse_number(s),
        PropertyType::Boolean => parse_boolean(s),
        PropertyType::String | PropertyType::Array | PropertyType::Object => None,
    }
}

fn parse_integer(s: &str) -> Option<Value> {
    let s = s.trim();
    s.parse::<i64>()
        .map(Value::from)
        .or_else(|_| s.parse::<u64>().map(Value::from))
        .ok()
}

fn parse_number(s: &str) -> Option<Value> {
    s.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_boolean(s: &str) -> Option<Value> {
    let lower = s.to_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Some(Value::Bool(true))
    } else if FALSY.contains(&lower.as_str()) {
        Some(Value::Bool(false))
    } else {
        None
    }
}
