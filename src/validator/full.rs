//! Draft-7 validation through the `jsonschema` crate.

use serde_json::{Map, Value};

use super::{BackendKind, BackendOptions, SchemaValidator};
use crate::Result;
#[cfg(not(feature = "full-validator"))]
use crate::Error;

/// Full JSON Schema (Draft 7) backend.
///
/// Errors are formatted as `"<dotted.path>: <message>"`, with `<root>` for
/// violations on the argument object itself, and sorted by path.
#[derive(Debug, Clone)]
pub struct FullFeaturedValidator {
    options: BackendOptions,
}

impl FullFeaturedValidator {
    /// Construct the backend if the engine is usable.
    ///
    /// Fails with [`Error::BackendUnavailable`](crate::Error::BackendUnavailable)
    /// when the crate was built without the `full-validator` feature.
    pub fn probe(options: BackendOptions) -> Result<Self> {
        #[cfg(feature = "full-validator")]
        {
            engine::probe()?;
            Ok(Self { options })
        }
        #[cfg(not(feature = "full-validator"))]
        {
            let _ = options;
            Err(Error::BackendUnavailable(
                "built without the `full-validator` feature".to_string(),
            ))
        }
    }
}

impl SchemaValidator for FullFeaturedValidator {
    fn kind(&self) -> BackendKind {
        BackendKind::Full
    }

    fn validate(&self, args: &Map<String, Value>, schema: &Value) -> Result<Vec<String>> {
        #[cfg(feature = "full-validator")]
        {
            engine::validate(args, schema, self.options)
        }
        #[cfg(not(feature = "full-validator"))]
        {
            let _ = (args, schema, self.options);
            Err(Error::BackendUnavailable(
                "built without the `full-validator` feature".to_string(),
            ))
        }
    }
}

#[cfg(feature = "full-validator")]
mod engine {
    use std::borrow::Cow;

    use jsonschema::Draft;
    use serde_json::{Map, Value, json};

    use super::BackendOptions;
    use crate::validator::ROOT_PATH;
    use crate::{Error, Result};

    /// Compile a trivial schema to make sure the engine works at all.
    pub(super) fn probe() -> Result<()> {
        compile(&json!({ "type": "object" }))
            .map(|_| ())
            .map_err(|e| Error::BackendUnavailable(e.to_string()))
    }

    pub(super) fn validate(
        args: &Map<String, Value>,
        schema: &Value,
        options: BackendOptions,
    ) -> Result<Vec<String>> {
        let schema = effective_schema(schema, options);
        let validator = compile(&schema)?;
        let instance = Value::Object(args.clone());

        let mut violations: Vec<(Vec<String>, String)> = validator
            .iter_errors(&instance)
            .map(|err| (path_segments(&err.instance_path.to_string()), err.to_string()))
            .collect();
        violations.sort_by(|a, b| {
            let left = a.0.iter().map(|seg| SegmentKey::of(seg));
            left.cmp(b.0.iter().map(|seg| SegmentKey::of(seg)))
        });

        Ok(violations
            .into_iter()
            .map(|(path, message)| {
                if path.is_empty() {
                    format!("{ROOT_PATH}: {message}")
                } else {
                    format!("{}: {message}", path.join("."))
                }
            })
            .collect())
    }

    fn compile(schema: &Value) -> Result<jsonschema::Validator> {
        jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(schema)
            .map_err(|err| Error::SchemaCompile(err.to_string()))
    }

    /// In strict mode, add `additionalProperties: false` unless the schema
    /// already says something about it.
    fn effective_schema(schema: &Value, options: BackendOptions) -> Cow<'_, Value> {
        if options.allow_additional_properties {
            return Cow::Borrowed(schema);
        }
        match schema {
            Value::Object(obj) if !obj.contains_key("additionalProperties") => {
                let mut obj = obj.clone();
                obj.insert("additionalProperties".into(), Value::Bool(false));
                Cow::Owned(Value::Object(obj))
            }
            _ => Cow::Borrowed(schema),
        }
    }

    /// Sort key for one path segment. Array indices order numerically, so
    /// `l.2` comes before `l.10`.
    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub(super) enum SegmentKey<'a> {
        Index(usize),
        Name(&'a str),
    }

    impl<'a> SegmentKey<'a> {
        pub(super) fn of(segment: &'a str) -> Self {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                segment.parse().map_or(Self::Name(segment), Self::Index)
            } else {
                Self::Name(segment)
            }
        }
    }

    /// Split a JSON pointer (`/a/0/b`) into unescaped segments.
    pub(super) fn path_segments(pointer: &str) -> Vec<String> {
        pointer
            .split('/')
            .skip(1)
            .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
            .collect()
    }
}
