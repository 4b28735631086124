//! # Schema Model
//!
//! Typed representation of a schema node, parsed from the plain nested
//! mapping representation:
//!
//! ```yaml
//! type: dict
//! schema:
//!   image: {type: string}
//!   opacity: {type: integer, default: 100}
//! ```
//!
//! ## Recognized Keys
//!
//! `type`, `required`, `default`, `nullable`, `schema`, `anyof`,
//! `allow_unknown`. Any other key is rejected when the schema is parsed, so
//! a misspelled rule fails early instead of being silently ignored.
//!
//! The meaning of `schema` depends on the effective type: for `list` it is
//! the element schema, otherwise it maps field names to field schemas.
//! `anyof` candidates without their own `type` inherit the parent's type for
//! this decision.

use serde_json::{Map, Value};
use sure_core::{SchemaError, Stack, TypeKind};

/// Keys accepted in a schema node.
pub const RECOGNIZED_KEYS: [&str; 7] = [
    "type",
    "required",
    "default",
    "nullable",
    "schema",
    "anyof",
    "allow_unknown",
];

/// A named field inside a dict schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Schema applied to the field's value.
    pub schema: Schema,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Structural rules carried by the `schema` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Rules {
    /// Field schemas of a dict, in declared order.
    Fields(Vec<Field>),
    /// Element schema of a list.
    Items(Box<Schema>),
}

/// A schema node.
///
/// Flags are stored as `Option` so that an `anyof` candidate can tell
/// "explicitly set" apart from "inherited"; use the effective accessors
/// (`is_required()` and friends) to read them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Declared type; `None` accepts any value.
    pub kind: Option<TypeKind>,
    /// Whether a missing field is an error. Effective default: `true`.
    pub required: Option<bool>,
    /// Whether `null` passes through unchecked. Effective default: `false`.
    pub nullable: Option<bool>,
    /// Whether undeclared dict keys are kept. Effective default: `false`.
    pub allow_unknown: Option<bool>,
    /// Value substituted for an absent field.
    pub default: Option<Value>,
    /// Ordered candidate schemas; the first that normalizes wins.
    pub anyof: Option<Vec<Schema>>,
    /// Field or element schemas.
    pub rules: Option<Rules>,
}

impl Schema {
    /// Effective `required` flag.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }

    /// Effective `nullable` flag.
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    /// Effective `allow_unknown` flag.
    pub fn allows_unknown(&self) -> bool {
        self.allow_unknown.unwrap_or(false)
    }

    /// Dict field schemas; empty when none are declared.
    pub fn fields(&self) -> &[Field] {
        match &self.rules {
            Some(Rules::Fields(fields)) => fields,
            _ => &[],
        }
    }

    /// List element schema, if declared.
    pub fn items(&self) -> Option<&Schema> {
        match &self.rules {
            Some(Rules::Items(items)) => Some(items),
            _ => None,
        }
    }

    /// Look up a dict field schema by name.
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.schema)
    }

    /// The schema used to try one `anyof` candidate.
    ///
    /// Starts from this schema without its `anyof` list; every key the
    /// candidate sets replaces the inherited one.
    pub fn overlay(&self, candidate: &Schema) -> Schema {
        Schema {
            kind: candidate.kind.or(self.kind),
            required: candidate.required.or(self.required),
            nullable: candidate.nullable.or(self.nullable),
            allow_unknown: candidate.allow_unknown.or(self.allow_unknown),
            default: candidate.default.clone().or_else(|| self.default.clone()),
            anyof: candidate.anyof.clone(),
            rules: candidate.rules.clone().or_else(|| self.rules.clone()),
        }
    }

    /// Parse a schema node from its mapping representation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` for non-mapping nodes, unrecognized keys or
    /// type names, wrongly shaped values, and empty `anyof` lists.
    pub fn from_value(value: &Value) -> Result<Schema, SchemaError> {
        parse_node(value, None, &Stack::root())
    }

    /// Parse a bare field-name → schema mapping.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the mapping or any field schema is malformed.
    pub fn fields_from_value(value: &Value) -> Result<Vec<Field>, SchemaError> {
        let map = value
            .as_object()
            .ok_or_else(|| SchemaError::NotAMapping { path: Stack::root() })?;
        parse_fields(map, &Stack::root())
    }

    /// Render back to the mapping representation.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(kind) = self.kind {
            map.insert("type".into(), Value::String(kind.as_str().into()));
        }
        if let Some(required) = self.required {
            map.insert("required".into(), Value::Bool(required));
        }
        if let Some(default) = &self.default {
            map.insert("default".into(), default.clone());
        }
        if let Some(nullable) = self.nullable {
            map.insert("nullable".into(), Value::Bool(nullable));
        }
        match &self.rules {
            Some(Rules::Fields(fields)) => {
                map.insert("schema".into(), fields_to_value(fields));
            }
            Some(Rules::Items(items)) => {
                map.insert("schema".into(), items.to_value());
            }
            None => {}
        }
        if let Some(anyof) = &self.anyof {
            map.insert(
                "anyof".into(),
                Value::Array(anyof.iter().map(Schema::to_value).collect()),
            );
        }
        if let Some(allow_unknown) = self.allow_unknown {
            map.insert("allow_unknown".into(), Value::Bool(allow_unknown));
        }
        Value::Object(map)
    }
}

/// Render a field list as a field-name → schema mapping.
pub fn fields_to_value(fields: &[Field]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|f| (f.name.clone(), f.schema.to_value()))
            .collect(),
    )
}

fn parse_node(
    value: &Value,
    inherited: Option<TypeKind>,
    path: &Stack,
) -> Result<Schema, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAMapping { path: path.clone() })?;

    if let Some(key) = map.keys().find(|k| !RECOGNIZED_KEYS.contains(&k.as_str())) {
        return Err(SchemaError::UnknownKey {
            key: key.clone(),
            path: path.clone(),
        });
    }

    let kind = match map.get("type") {
        None => None,
        Some(Value::String(name)) => Some(TypeKind::parse(name).ok_or_else(|| {
            SchemaError::UnknownType {
                name: name.clone(),
                path: path.clone(),
            }
        })?),
        Some(_) => {
            return Err(invalid_key("type", "a type name string", path));
        }
    };
    let effective = kind.or(inherited);

    // Field and element schemas both sit under a `schema` path segment.
    let rules_path = path.child("schema");
    let rules = match map.get("schema") {
        None => None,
        Some(rules) if effective == Some(TypeKind::List) => Some(Rules::Items(Box::new(
            parse_node(rules, None, &rules_path)?,
        ))),
        Some(rules) => {
            let fields = rules.as_object().ok_or_else(|| {
                invalid_key("schema", "a mapping of field names to schemas", path)
            })?;
            Some(Rules::Fields(parse_fields(fields, &rules_path)?))
        }
    };

    let anyof = match map.get("anyof") {
        None => None,
        Some(Value::Array(candidates)) => {
            if candidates.is_empty() {
                return Err(SchemaError::EmptyAnyOf { path: path.clone() });
            }
            let anyof_path = path.child("anyof");
            let parsed = candidates
                .iter()
                .enumerate()
                .map(|(i, c)| parse_node(c, effective, &anyof_path.index(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Some(parsed)
        }
        Some(_) => return Err(invalid_key("anyof", "a list of schemas", path)),
    };

    Ok(Schema {
        kind,
        required: parse_flag(map, "required", path)?,
        nullable: parse_flag(map, "nullable", path)?,
        allow_unknown: parse_flag(map, "allow_unknown", path)?,
        default: map.get("default").cloned(),
        anyof,
        rules,
    })
}

fn parse_fields(map: &Map<String, Value>, path: &Stack) -> Result<Vec<Field>, SchemaError> {
    map.iter()
        .map(|(name, field)| {
            let schema = parse_node(field, None, &path.child(name.as_str()))?;
            Ok(Field::new(name.clone(), schema))
        })
        .collect()
}

fn parse_flag(map: &Map<String, Value>, key: &str, path: &Stack) -> Result<Option<bool>, SchemaError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(SchemaError::InvalidKey {
            key: key.to_string(),
            expected: "a boolean",
            path: path.clone(),
        }),
    }
}

fn invalid_key(key: &str, expected: &'static str, path: &Stack) -> SchemaError {
    SchemaError::InvalidKey {
        key: key.to_string(),
        expected,
        path: path.clone(),
    }
}
