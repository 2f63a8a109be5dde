//! Declarative schema construction for tool authors.
//!
//! Rust has no runtime parameter reflection, so schemas are either declared
//! explicitly with [`SchemaBuilder`] or generated from a list of
//! [`ParamSpec`]s. [`ParamType::of`] derives a JSON type from a Rust type
//! name; anything it does not recognise degrades to `"string"`.
//!
//! ```rust
//! use mcp_arg_validator::schema::{ParamType, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .typed::<String>("query")
//!     .typed::<Option<u32>>("limit")
//!     .optional("verbose", ParamType::Boolean)
//!     .describe("query", "Search terms")
//!     .build();
//!
//! assert_eq!(schema["properties"]["limit"]["type"], "integer");
//! assert_eq!(schema["required"], serde_json::json!(["query"]));
//! ```

use serde_json::{Map, Value, json};

use super::PropertyType;

/// JSON type assigned to a tool parameter.
pub type ParamType = PropertyType;

impl ParamType {
    /// Map a Rust type to the JSON type used in generated schemas.
    ///
    /// `Option<T>` maps to the type of `T`; use [`ParamType::is_optional`] to
    /// detect the wrapper.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::from_type_name(std::any::type_name::<T>())
    }

    /// Whether a Rust type is an `Option`, i.e. the parameter has a default.
    #[must_use]
    pub fn is_optional<T: ?Sized>() -> bool {
        option_inner(std::any::type_name::<T>()).is_some()
    }

    /// Map a type name as produced by [`std::any::type_name`].
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        let name = name.trim().trim_start_matches('&').trim_start_matches("mut ").trim();

        if let Some(inner) = option_inner(name) {
            return Self::from_type_name(inner);
        }

        if name.starts_with('[') {
            return Self::Array;
        }

        let base = name.split('<').next().unwrap_or(name);
        let last = base.rsplit("::").next().unwrap_or(base);

        match last {
            "String" | "str" | "char" | "Cow" | "PathBuf" | "Path" => Self::String,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            "f32" | "f64" => Self::Number,
            "bool" => Self::Boolean,
            "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => Self::Array,
            "HashMap" | "BTreeMap" | "Map" => Self::Object,
            _ => Self::String,
        }
    }
}

/// Inner type name of `Option<..>`, if `name` is one.
fn option_inner(name: &str) -> Option<&str> {
    let open = name.find('<')?;
    let base = &name[..open];
    if base.rsplit("::").next() != Some("Option") {
        return None;
    }
    let close = name.rfind('>')?;
    Some(&name[open + 1..close])
}

/// Builds an object schema one parameter at a time.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Start an empty object schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter.
    pub fn required(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        let name = name.into();
        self.insert(&name, ty);
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Add an optional parameter.
    pub fn optional(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        let name = name.into();
        self.insert(&name, ty);
        self.required.retain(|r| r != &name);
        self
    }

    /// Add a parameter whose JSON type and optionality come from `T`.
    pub fn typed<T: ?Sized>(self, name: impl Into<String>) -> Self {
        if ParamType::is_optional::<T>() {
            self.optional(name, ParamType::of::<T>())
        } else {
            self.required(name, ParamType::of::<T>())
        }
    }

    /// Attach a description to an already-declared parameter.
    pub fn describe(mut self, name: &str, description: impl Into<String>) -> Self {
        if let Some(Value::Object(prop)) = self.properties.get_mut(name) {
            prop.insert("description".into(), Value::String(description.into()));
        }
        self
    }

    /// Restrict an already-declared parameter to a fixed set of values.
    pub fn allowed_values(mut self, name: &str, values: impl IntoIterator<Item = Value>) -> Self {
        if let Some(Value::Object(prop)) = self.properties.get_mut(name) {
            prop.insert("enum".into(), Value::Array(values.into_iter().collect()));
        }
        self
    }

    /// Produce `{"type": "object", "properties": {...}, "required": [...]}`.
    #[must_use]
    pub fn build(self) -> Value {
        json!({
            "type": "object",
            "properties": self.properties,
            "required": self.required,
        })
    }

    fn insert(&mut self, name: &str, ty: ParamType) {
        self.properties
            .insert(name.to_string(), json!({ "type": ty.as_str() }));
    }
}

/// One declared parameter of a tool handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name
    pub name: String,
    /// Declared type, if known
    pub ty: Option<ParamType>,
    /// Whether the parameter has a default value
    pub has_default: bool,
}

impl ParamSpec {
    /// A parameter without a default.
    pub fn new(name: impl Into<String>, ty: Option<ParamType>) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    /// A parameter described by a Rust type; `Option<T>` counts as defaulted.
    pub fn of<T: ?Sized>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ParamType::of::<T>()),
            has_default: ParamType::is_optional::<T>(),
        }
    }

    /// Mark the parameter as having a default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Generate an object schema from a parameter list.
///
/// A leading `self` receiver is skipped. Parameters without a type become
/// strings; parameters without a default are required.
#[must_use]
pub fn generate_schema(params: &[ParamSpec]) -> Value {
    let params = match params.first() {
        Some(first) if first.name == "self" => &params[1..],
        _ => params,
    };

    params
        .iter()
        .fold(SchemaBuilder::new(), |builder, param| {
            let ty = param.ty.unwrap_or(ParamType::String);
            if param.has_default {
                builder.optional(param.name.clone(), ty)
            } else {
                builder.required(param.name.clone(), ty)
            }
        })
        .build()
}
