//! Schema extraction and the small vocabulary shared by coercion and
//! validation.
//!
//! A tool descriptor carries its argument schema either nested under
//! `inputSchema` (the MCP convention) or as a bare schema object. Everything
//! downstream works on the bare object returned by [`extract_input_schema`].

pub mod builder;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use builder::{ParamSpec, ParamType, SchemaBuilder, generate_schema};

/// Key under which a tool descriptor nests its JSON Schema.
pub const INPUT_SCHEMA_KEY: &str = "inputSchema";

/// Pull the usable schema object out of a tool descriptor.
///
/// - `{"inputSchema": X}` → `X`, returned verbatim.
/// - an object with `type` or `properties` → the object itself.
/// - anything else → `None` (no schema, validation is skipped).
#[must_use]
pub fn extract_input_schema(schema: &Value) -> Option<&Value> {
    let obj = schema.as_object()?;

    // An explicit `inputSchema: null` declares that the tool takes no schema
    if let Some(nested) = obj.get(INPUT_SCHEMA_KEY) {
        return (!nested.is_null()).then_some(nested);
    }

    if obj.contains_key("type") || obj.contains_key("properties") {
        return Some(schema);
    }

    None
}

/// Declared `properties` of a schema, if it has any in object form.
#[must_use]
pub fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

/// Names listed under `required`. Non-string entries are ignored.
#[must_use]
pub fn required(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// The primitive JSON types a property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// `"string"`
    String,
    /// `"integer"`
    Integer,
    /// `"number"` (integers included)
    Number,
    /// `"boolean"`
    Boolean,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
}

impl PropertyType {
    /// Parse a JSON Schema `type` keyword. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Declared type of a property schema, when it is a single known name.
    #[must_use]
    pub fn of_property(prop_schema: &Value) -> Option<Self> {
        prop_schema
            .get("type")
            .and_then(Value::as_str)
            .and_then(Self::parse)
    }

    /// Schema keyword for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether `value` is an instance of this type.
    ///
    /// Integers are numbers. Booleans are neither, and floats are never
    /// integers, even with a zero fraction.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime type name of a JSON value, as reported in type-mismatch errors.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A tool definition as exchanged over MCP `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input JSON Schema
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Schema to validate against, using the same rules as
    /// [`extract_input_schema`] on the bare schema value.
    #[must_use]
    pub fn input_schema(&self) -> Option<&Value> {
        extract_input_schema(&self.input_schema)
    }
}
