//! End-to-end behaviour of `validate_tool_arguments` and `ArgumentValidator`

use mcp_arg_validator::config::ValidationConfig;
use mcp_arg_validator::schema::{ParamSpec, ParamType, SchemaBuilder, generate_schema};
use mcp_arg_validator::{
    ArgumentValidator, BackendKind, BackendPreference, ValidationResult, validate_tool_arguments,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn validator(backend: BackendPreference) -> ArgumentValidator {
    ArgumentValidator::new(&ValidationConfig {
        backend,
        ..ValidationConfig::default()
    })
    .unwrap()
}

/// Every backend compiled into this build.
fn backends() -> Vec<ArgumentValidator> {
    let mut all = vec![validator(BackendPreference::Minimal)];
    if cfg!(feature = "full-validator") {
        all.push(validator(BackendPreference::Full));
    }
    all
}

fn run(v: &ArgumentValidator, args: Value, schema: &Value) -> ValidationResult {
    v.validate("test_tool", &args, schema, true).unwrap()
}

fn x_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "x": { "type": "integer" } },
        "required": ["x"]
    })
}

fn prop_schema(prop: Value) -> Value {
    json!({ "type": "object", "properties": { "v": prop } })
}

#[test]
fn test_schemaless_descriptor_passes_through() {
    let args = json!({ "a": "1", "b": [true, null], "c": { "d": 2.5 } });
    let descriptor = json!({ "name": "free_form", "description": "no schema here" });

    let result = validate_tool_arguments("free_form", &args, &descriptor, true).unwrap();
    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert_eq!(Value::Object(result.coerced_args), args);

    // Deterministic on repeat
    let again = validate_tool_arguments("free_form", &args, &descriptor, true).unwrap();
    assert!(again.valid);
    assert_eq!(Value::Object(again.coerced_args), args);
}

#[test]
fn test_null_input_schema_passes_through() {
    let args = json!({ "a": "1", "b": [true] });
    let descriptor = json!({ "name": "t", "inputSchema": null });

    for v in backends() {
        let result = run(&v, args.clone(), &descriptor);
        assert!(result.valid, "{:?}: {:?}", v.backend_kind(), result.errors);
        assert_eq!(Value::Object(result.coerced_args), args);
    }

    let result = validate_tool_arguments("t", &args, &descriptor, true).unwrap();
    assert!(result.valid);
    assert_eq!(Value::Object(result.coerced_args), args);
}

#[test]
fn test_missing_required_field() {
    for v in backends() {
        let result = run(&v, json!({}), &x_schema());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1, "{:?}", v.backend_kind());
        assert!(result.errors[0].contains('x'));
        assert!(result.errors[0].contains("required"));
    }
}

#[test]
fn test_integer_string_coerced() {
    for v in backends() {
        let result = run(&v, json!({ "x": "42" }), &x_schema());
        assert!(result.valid, "{:?}: {:?}", v.backend_kind(), result.errors);
        assert_eq!(Value::Object(result.coerced_args), json!({ "x": 42 }));
    }
}

#[test]
fn test_failed_coercion_surfaces_as_type_error() {
    for v in backends() {
        let result = run(&v, json!({ "x": "not-a-number" }), &x_schema());
        assert!(!result.valid);
        assert!(result.coerced_args.is_empty());
        assert!(result.errors[0].contains("not-a-number") || result.errors[0].contains("type"));
    }

    let minimal = validator(BackendPreference::Minimal);
    assert_eq!(
        run(&minimal, json!({ "x": "not-a-number" }), &x_schema()).errors,
        vec!["x: expected type 'integer', got 'string'"]
    );
}

#[test]
fn test_boolean_coercion() {
    let schema = prop_schema(json!({ "type": "boolean" }));
    for v in backends() {
        assert_eq!(run(&v, json!({ "v": "yes" }), &schema).coerced_args["v"], json!(true));
        assert_eq!(run(&v, json!({ "v": "off" }), &schema).coerced_args["v"], json!(false));
        assert!(!run(&v, json!({ "v": "maybe" }), &schema).valid);
    }
}

#[test]
fn test_enum_enforced() {
    let schema = prop_schema(json!({ "type": "string", "enum": ["a", "b"] }));
    for v in backends() {
        let result = run(&v, json!({ "v": "c" }), &schema);
        assert!(!result.valid);
        assert!(result.errors[0].contains("\"c\""), "{:?}", result.errors);
    }

    let minimal = validator(BackendPreference::Minimal);
    assert_eq!(
        run(&minimal, json!({ "v": "c" }), &schema).errors,
        vec![r#"v: value "c" not in allowed values ["a","b"]"#]
    );
}

#[test]
fn test_numeric_bounds() {
    let schema = prop_schema(json!({ "type": "integer", "minimum": 0, "maximum": 10 }));
    for v in backends() {
        assert!(!run(&v, json!({ "v": 15 }), &schema).valid);
        assert!(!run(&v, json!({ "v": -1 }), &schema).valid);
        assert!(run(&v, json!({ "v": "7" }), &schema).valid);
    }

    let minimal = validator(BackendPreference::Minimal);
    let errors = run(&minimal, json!({ "v": 15 }), &schema).errors;
    assert!(errors[0].contains("maximum"), "{errors:?}");

    // Coerced integers past 2^53 keep their exact value against the bound
    let wide = prop_schema(json!({ "type": "integer", "maximum": 9_007_199_254_740_992_u64 }));
    let result = run(&minimal, json!({ "v": "9007199254740993" }), &wide);
    assert!(!result.valid);
    assert_eq!(
        result.errors,
        vec!["v: 9007199254740993 > maximum 9007199254740992"]
    );
}

#[test]
fn test_pattern_enforced() {
    let schema = prop_schema(json!({ "type": "string", "pattern": "^[a-z]+$" }));
    for v in backends() {
        assert!(!run(&v, json!({ "v": "ABC" }), &schema).valid);
        assert!(run(&v, json!({ "v": "abc" }), &schema).valid);
    }

    let minimal = validator(BackendPreference::Minimal);
    let errors = run(&minimal, json!({ "v": "ABC" }), &schema).errors;
    assert!(errors[0].contains("does not match pattern"), "{errors:?}");
}

#[test]
fn test_unknown_keys_pass_through_unchanged() {
    for v in backends() {
        let result = run(&v, json!({ "x": "3", "note": "42", "flag": "yes" }), &x_schema());
        assert!(result.valid);
        assert_eq!(
            Value::Object(result.coerced_args),
            json!({ "x": 3, "note": "42", "flag": "yes" })
        );
    }
}

#[test]
fn test_strict_mode_rejects_unknown_keys() {
    for backend in [BackendPreference::Minimal, BackendPreference::Auto] {
        let strict = ArgumentValidator::new(&ValidationConfig {
            allow_additional_properties: false,
            backend,
            ..ValidationConfig::default()
        })
        .unwrap();

        let result = strict.check("t", &json!({ "x": 1, "note": "hi" }), &x_schema()).unwrap();
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("note")), "{:?}", result.errors);
    }
}

#[test]
fn test_all_violations_reported_together() {
    let schema = json!({
        "type": "object",
        "properties": {
            "count": { "type": "integer", "maximum": 20 },
            "mode": { "type": "string", "enum": ["fast", "slow"] }
        },
        "required": ["query"]
    });
    for v in backends() {
        let result = run(&v, json!({ "count": 50, "mode": "medium" }), &schema);
        assert_eq!(result.errors.len(), 3, "{:?}: {:?}", v.backend_kind(), result.errors);
    }
}

#[test]
fn test_minimal_preference_and_auto_selection() {
    assert_eq!(validator(BackendPreference::Minimal).backend_kind(), BackendKind::Minimal);

    let expected = if cfg!(feature = "full-validator") {
        BackendKind::Full
    } else {
        BackendKind::Minimal
    };
    assert_eq!(validator(BackendPreference::Auto).backend_kind(), expected);
}

#[test]
fn test_generated_schema_validates_its_arguments() {
    let schema = generate_schema(&[
        ParamSpec::of::<String>("path"),
        ParamSpec::of::<u64>("offset"),
        ParamSpec::of::<Option<bool>>("follow"),
    ]);
    for v in backends() {
        let ok = run(&v, json!({ "path": "/tmp/a", "offset": "10", "follow": "no" }), &schema);
        assert!(ok.valid, "{:?}", ok.errors);
        assert_eq!(ok.coerced_args["offset"], json!(10));
        assert_eq!(ok.coerced_args["follow"], json!(false));

        let missing = run(&v, json!({ "offset": 1 }), &schema);
        assert!(!missing.valid);
    }
}

#[test]
fn test_builder_schema_inside_descriptor() {
    let descriptor = json!({
        "name": "set_level",
        "inputSchema": SchemaBuilder::new()
            .required("level", ParamType::String)
            .allowed_values("level", [json!("debug"), json!("info")])
            .build()
    });
    for v in backends() {
        assert!(run(&v, json!({ "level": "info" }), &descriptor).valid);
        assert!(!run(&v, json!({ "level": "loud" }), &descriptor).valid);
    }
}

#[test]
fn test_format_error_lists_every_parameter() {
    let schema = json!({
        "type": "object",
        "properties": {
            "query": { "type": "string" },
            "count": { "type": "integer" }
        },
        "required": ["query"]
    });
    let result = run(&validator(BackendPreference::Minimal), json!({ "count": "x" }), &schema);

    let message = result.format_error(&schema);
    assert!(message.contains("query: (string [required])"), "{message}");
    assert!(message.contains("count: (integer [optional])"), "{message}");
}

#[test]
fn test_invalid_pattern_propagates() {
    let schema = prop_schema(json!({ "type": "string", "pattern": "([a-z" }));
    for v in backends() {
        assert!(v.validate("t", &json!({ "v": "abc" }), &schema, true).is_err());
    }
}
