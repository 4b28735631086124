//! # Type Kinds
//!
//! The fixed enumeration of schema `type` tags and the runtime predicate
//! that decides whether a `serde_json::Value` is of that kind.
//!
//! | tag       | accepts                                   |
//! |-----------|-------------------------------------------|
//! | `dict`    | JSON objects                              |
//! | `string`  | JSON strings                              |
//! | `integer` | numbers stored as `i64` or `u64`          |
//! | `float`   | numbers stored as `f64`                   |
//! | `number`  | any number                                |
//! | `boolean` | `true` / `false` (never an integer)       |
//! | `list`    | JSON arrays                               |
//!
//! `null` matches no kind; it is only accepted through `nullable`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A mapping whose fields are described by nested schemas.
    Dict,
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Float,
    /// Integer or float.
    Number,
    /// Boolean.
    Boolean,
    /// Sequence, optionally with an element schema.
    List,
}

impl TypeKind {
    /// All kinds, in declaration order.
    pub const ALL: [TypeKind; 7] = [
        TypeKind::Dict,
        TypeKind::String,
        TypeKind::Integer,
        TypeKind::Float,
        TypeKind::Number,
        TypeKind::Boolean,
        TypeKind::List,
    ];

    /// Parse a schema `type` tag. Returns `None` for unrecognized names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "dict" => Some(TypeKind::Dict),
            "string" => Some(TypeKind::String),
            "integer" => Some(TypeKind::Integer),
            "float" => Some(TypeKind::Float),
            "number" => Some(TypeKind::Number),
            "boolean" => Some(TypeKind::Boolean),
            "list" => Some(TypeKind::List),
            _ => None,
        }
    }

    /// The tag as written in schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Dict => "dict",
            TypeKind::String => "string",
            TypeKind::Integer => "integer",
            TypeKind::Float => "float",
            TypeKind::Number => "number",
            TypeKind::Boolean => "boolean",
            TypeKind::List => "list",
        }
    }

    /// Whether `value` has this kind at runtime.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeKind::Dict, Value::Object(_)) => true,
            (TypeKind::String, Value::String(_)) => true,
            (TypeKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (TypeKind::Float, Value::Number(n)) => n.is_f64(),
            (TypeKind::Number, Value::Number(_)) => true,
            (TypeKind::Boolean, Value::Bool(_)) => true,
            (TypeKind::List, Value::Array(_)) => true,
            _ => false,
        }
    }

    /// Name of the runtime shape of `value`, for diagnostics.
    pub fn of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Object(_) => "dict",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeKind::parse(s).ok_or_else(|| format!("unknown type '{s}'"))
    }
}
