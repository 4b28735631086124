//! Integration tests: normalization driven by schema documents in their
//! plain mapping form, the way schemas arrive from configuration files.

use serde_json::{json, Value};
use sure_schema::{
    normalize_dict, normalize_schema, NormalizeError, Schema, Stack, TypeKind,
};

fn schema(doc: Value) -> Schema {
    Schema::from_value(&doc).expect("test schema should parse")
}

fn fields(doc: Value) -> Vec<sure_schema::Field> {
    Schema::fields_from_value(&doc).expect("test fields should parse")
}

// ---------------------------------------------------------------------------
// Dict normalization
// ---------------------------------------------------------------------------

#[test]
fn test_matching_document_round_trips() {
    let id_int = fields(json!({"id": {"type": "integer"}}));
    let sample = json!({"id": 3});
    assert_eq!(normalize_dict(&id_int, &sample).unwrap(), sample);
}

#[test]
fn test_bad_type() {
    let id_int = fields(json!({"id": {"type": "integer"}}));
    match normalize_dict(&id_int, &json!({"id": "3"})).unwrap_err() {
        NormalizeError::BadType { value, type_, stack } => {
            assert_eq!(value, json!("3"));
            assert_eq!(type_, TypeKind::Integer);
            assert_eq!(stack, Stack::from(["id"]));
        }
        other => panic!("expected BadType, got: {other}"),
    }
}

#[test]
fn test_field_not_found() {
    let id_int = fields(json!({"id": {"type": "integer"}}));
    match normalize_dict(&id_int, &json!({"foo": "bar"})).unwrap_err() {
        NormalizeError::DictFieldNotFound { key, value, stack } => {
            assert_eq!(key, "id");
            assert_eq!(value, json!({"foo": "bar"}));
            assert!(stack.is_empty());
        }
        other => panic!("expected DictFieldNotFound, got: {other}"),
    }
}

#[test]
fn test_nested_field_not_found_reports_containing_dict() {
    let nested = fields(json!({
        "outer": {"type": "dict", "schema": {
            "inner": {"type": "dict", "schema": {"id": {"type": "integer"}}}
        }}
    }));
    let err = normalize_dict(&nested, &json!({"outer": {"inner": {}}})).unwrap_err();
    assert_eq!(err.kind_name(), "dict_field_not_found");
    assert_eq!(err.stack(), &Stack::from(["outer", "inner"]));
}

#[test]
fn test_nested_error() {
    let nested_num_int = fields(json!({
        "nested": {"type": "dict", "schema": {"num": {"type": "integer"}}}
    }));
    let err = normalize_dict(&nested_num_int, &json!({"nested": {"num": "three!"}})).unwrap_err();
    match err {
        NormalizeError::BadType { value, type_, stack } => {
            assert_eq!(value, json!("three!"));
            assert_eq!(type_, TypeKind::Integer);
            assert_eq!(stack, Stack::from(["nested", "num"]));
        }
        other => panic!("expected BadType, got: {other}"),
    }
}

#[test]
fn test_default() {
    let default_num = fields(json!({"num": {"type": "integer", "default": 0}}));
    let old_dict = json!({});
    let new_dict = normalize_dict(&default_num, &old_dict).unwrap();
    assert_eq!(old_dict, json!({}));
    assert_eq!(new_dict, json!({"num": 0}));
}

#[test]
fn test_nested_defaults_fill_every_level() {
    let schema = schema(json!({
        "type": "dict",
        "schema": {
            "style": {"type": "dict", "schema": {
                "color": {"type": "string", "default": "black"},
                "width": {"type": "number", "default": 1}
            }},
            "label": {"type": "string", "required": false}
        }
    }));
    let out = normalize_schema(&schema, &json!({"style": {"width": 2.5}})).unwrap();
    assert_eq!(out, json!({"style": {"color": "black", "width": 2.5}}));
}

#[test]
fn test_unknown_field_rejected_and_allowed() {
    let strict = schema(json!({"type": "dict", "schema": {"id": {"type": "integer"}}}));
    let err = normalize_schema(&strict, &json!({"id": 1, "name": "x"})).unwrap_err();
    match err {
        NormalizeError::UnknownField { key, stack, .. } => {
            assert_eq!(key, "name");
            assert!(stack.is_empty());
        }
        other => panic!("expected UnknownField, got: {other}"),
    }

    let open = schema(json!({
        "type": "dict",
        "allow_unknown": true,
        "schema": {"id": {"type": "integer"}}
    }));
    let value = json!({"id": 1, "name": "x"});
    assert_eq!(normalize_schema(&open, &value).unwrap(), value);
}

#[test]
fn test_output_follows_schema_field_order() {
    let schema = schema(json!({
        "type": "dict",
        "allow_unknown": true,
        "schema": {
            "b": {"type": "integer", "default": 2},
            "a": {"type": "integer"}
        }
    }));
    let out = normalize_schema(&schema, &json!({"extra": true, "a": 1})).unwrap();
    let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["b", "a", "extra"]);
}

// ---------------------------------------------------------------------------
// Scalars and anyof
// ---------------------------------------------------------------------------

#[test]
fn test_normalize_schema_scalar() {
    assert_eq!(normalize_schema(&schema(json!({"type": "integer"})), &json!(3)).unwrap(), json!(3));
}

#[test]
fn test_anyof() {
    let anyof = schema(json!({"anyof": [{"type": "integer"}, {"type": "string"}]}));
    assert_eq!(normalize_schema(&anyof, &json!(3)).unwrap(), json!(3));
    assert_eq!(normalize_schema(&anyof, &json!("three")).unwrap(), json!("three"));
    let err = normalize_schema(&anyof, &json!([3])).unwrap_err();
    match err {
        NormalizeError::NoneMatched { value, failures, .. } => {
            assert_eq!(value, json!([3]));
            assert_eq!(failures.len(), 2);
            assert!(matches!(failures[0], NormalizeError::BadType { type_: TypeKind::Integer, .. }));
            assert!(matches!(failures[1], NormalizeError::BadType { type_: TypeKind::String, .. }));
        }
        other => panic!("expected NoneMatched, got: {other}"),
    }
}

#[test]
fn test_anyof_with_normalization() {
    let anyof = schema(json!({
        "type": "dict",
        "schema": {},
        "required": true,
        "anyof": [
            {"schema": {"gradient": {"type": "string"}}},
            {"schema": {
                "image": {"type": "string"},
                "opacity": {"type": "integer", "default": 100}
            }}
        ]
    }));

    let gfoo = json!({"gradient": "foo"});
    assert_eq!(normalize_schema(&anyof, &gfoo).unwrap(), gfoo);

    let ifoo_with_opacity = json!({"image": "foo", "opacity": 99});
    assert_eq!(normalize_schema(&anyof, &ifoo_with_opacity).unwrap(), ifoo_with_opacity);

    let ifoo_with_default = json!({"image": "foo"});
    assert_eq!(
        normalize_schema(&anyof, &ifoo_with_default).unwrap(),
        json!({"image": "foo", "opacity": 100})
    );
    assert_eq!(ifoo_with_default, json!({"image": "foo"}));
}

#[test]
fn test_anyof_nested_failure_keeps_field_stack() {
    let schema = schema(json!({
        "type": "dict",
        "schema": {
            "background": {"anyof": [{"type": "string"}, {"type": "integer"}]}
        }
    }));
    let err = normalize_schema(&schema, &json!({"background": true})).unwrap_err();
    match err {
        NormalizeError::NoneMatched { stack, failures, .. } => {
            assert_eq!(stack, Stack::from(["background"]));
            for failure in &failures {
                assert_eq!(failure.stack(), &Stack::from(["background"]));
            }
        }
        other => panic!("expected NoneMatched, got: {other}"),
    }
}

#[test]
fn test_nullable_with_anyof() {
    let anyof = schema(json!({
        "nullable": true,
        "anyof": [{"type": "integer"}, {"type": "string"}]
    }));
    assert_eq!(normalize_schema(&anyof, &Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_nullable_field_is_still_required() {
    let fields = fields(json!({"note": {"type": "string", "nullable": true}}));
    assert_eq!(
        normalize_dict(&fields, &json!({"note": null})).unwrap(),
        json!({"note": null})
    );
    let err = normalize_dict(&fields, &json!({})).unwrap_err();
    assert_eq!(err.kind_name(), "dict_field_not_found");
}

#[test]
fn test_list_of_dicts() {
    let schema = schema(json!({
        "type": "dict",
        "schema": {
            "layers": {"type": "list", "schema": {
                "type": "dict",
                "schema": {"opacity": {"type": "integer", "default": 100}}
            }}
        }
    }));
    let out = normalize_schema(&schema, &json!({"layers": [{}, {"opacity": 5}]})).unwrap();
    assert_eq!(out, json!({"layers": [{"opacity": 100}, {"opacity": 5}]}));

    let err = normalize_schema(&schema, &json!({"layers": [{"opacity": "x"}]})).unwrap_err();
    assert_eq!(err.stack().to_string(), "layers[0].opacity");
}
