//! Hand-written fallback validator.
//!
//! # Checks (in order)
//!
//! 1. **Required** – every name under `required:` must be a key of the
//!    arguments (a `null` value counts as present).
//! 2. **Additional properties** – only when strict mode is on.
//! 3. **Type** – declared `type` against the value's JSON type. A mismatch
//!    ends the checks for that key.
//! 4. **Enum**, **minimum / maximum** and **pattern** – all evaluated, none
//!    short-circuits another.
//!
//! Keys that are not declared under `properties` are never examined unless
//! strict mode rejects them outright.

use std::cmp::Ordering;

use regex::Regex;
use serde_json::{Map, Value};

use super::{BackendKind, BackendOptions, SchemaValidator, render};
use crate::schema::{self, PropertyType, json_type_name};
use crate::{Error, Result};

/// Minimal validator covering `required`, `type`, `enum`, bounds and
/// `pattern`.
#[derive(Debug, Clone, Default)]
pub struct MinimalValidator {
    options: BackendOptions,
}

impl MinimalValidator {
    /// Create a minimal validator.
    #[must_use]
    pub fn new(options: BackendOptions) -> Self {
        Self { options }
    }
}

impl SchemaValidator for MinimalValidator {
    fn kind(&self) -> BackendKind {
        BackendKind::Minimal
    }

    fn validate(&self, args: &Map<String, Value>, schema: &Value) -> Result<Vec<String>> {
        let mut errors = Vec::new();

        for name in schema::required(schema) {
            if !args.contains_key(name) {
                errors.push(format!("{name}: required field is missing"));
            }
        }

        let empty = Map::new();
        let properties = schema::properties(schema).unwrap_or(&empty);

        if !self.options.allow_additional_properties {
            for key in args.keys().filter(|k| !properties.contains_key(k.as_str())) {
                errors.push(format!("{key}: additional property is not allowed"));
            }
        }

        for (key, value) in args {
            if let Some(prop_schema) = properties.get(key) {
                check_property(key, value, prop_schema, &mut errors)?;
            }
        }

        Ok(errors)
    }
}

/// Run the type, enum, bounds and pattern checks for one property.
fn check_property(
    key: &str,
    value: &Value,
    prop_schema: &Value,
    errors: &mut Vec<String>,
) -> Result<()> {
    if let Some(expected) = PropertyType::of_property(prop_schema) {
        if !expected.matches(value) {
            errors.push(format!(
                "{key}: expected type '{expected}', got '{}'",
                json_type_name(value)
            ));
            return Ok(());
        }
    }

    if let Some(allowed) = prop_schema.get("enum").and_then(Value::as_array) {
        if !allowed.iter().any(|candidate| json_equal(candidate, value)) {
            errors.push(format!(
                "{key}: value {} not in allowed values {}",
                render(value),
                render(&Value::Array(allowed.clone()))
            ));
        }
    }

    if value.is_number() {
        if let Some(min) = prop_schema.get("minimum") {
            if compare_numbers(value, min) == Some(Ordering::Less) {
                errors.push(format!("{key}: {} < minimum {}", render(value), render(min)));
            }
        }
        if let Some(max) = prop_schema.get("maximum") {
            if compare_numbers(value, max) == Some(Ordering::Greater) {
                errors.push(format!("{key}: {} > maximum {}", render(value), render(max)));
            }
        }
    }

    if let (Some(s), Some(pattern)) = (
        value.as_str(),
        prop_schema.get("pattern").and_then(Value::as_str),
    ) {
        let re = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !re.is_match(s) {
            errors.push(format!(
                "{key}: value {} does not match pattern {}",
                render(value),
                render(&Value::String(pattern.to_string()))
            ));
        }
    }

    Ok(())
}

/// JSON equality where `1` and `1.0` are the same number.
/// Order two JSON numbers, exactly when both are integers.
///
/// Returns `None` when either side is not a number.
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    let (Value::Number(x), Value::Number(y)) = (a, b) else {
        return None;
    };
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        Some(x.cmp(&y))
    } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        Some(x.cmp(&y))
    } else {
        x.as_f64()?.partial_cmp(&y.as_f64()?)
    }
}

fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}
