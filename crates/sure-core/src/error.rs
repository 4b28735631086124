//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Normalization failures (`NormalizeError`) carry the offending value
//!   and the exact `Stack` at which normalization stopped.
//! - Malformed schemas are reported as `SchemaError` when the schema is
//!   parsed, never deep inside a normalization walk.
//! - `SureError` wraps both, plus file loading failures, for callers that
//!   load schemas and documents from disk.

use serde_json::Value;
use thiserror::Error;

use crate::kind::TypeKind;
use crate::path::Stack;

/// Top-level error type for the sure workspace.
#[derive(Error, Debug)]
pub enum SureError {
    /// The value did not normalize against the schema.
    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// The schema itself is malformed.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// A schema or document file could not be parsed.
    #[error("load error for '{path}': {reason}")]
    Load {
        /// Path of the file that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A value failed to normalize against a schema.
///
/// Every variant carries a `stack`: the path from the normalization root to
/// the point of failure, outermost first.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// The value's runtime type does not match the declared `type`.
    #[error("bad type at {stack}: expected {type_}, got {} {value}", TypeKind::of(.value))]
    BadType {
        /// The offending value.
        value: Value,
        /// The expected type.
        type_: TypeKind,
        /// Path to the offending value.
        stack: Stack,
    },

    /// A required field with no default is absent from the input mapping.
    #[error("required field '{key}' not found at {stack}")]
    DictFieldNotFound {
        /// Name of the missing field.
        key: String,
        /// The containing mapping.
        value: Value,
        /// Path to the containing mapping (does not include `key`).
        stack: Stack,
    },

    /// No `anyof` candidate normalized the value.
    #[error("none of {} anyof candidates matched at {stack}", .failures.len())]
    NoneMatched {
        /// The value every candidate rejected.
        value: Value,
        /// Path to the value.
        stack: Stack,
        /// One failure per candidate, in declared order.
        failures: Vec<NormalizeError>,
    },

    /// An input key has no declared field and `allow_unknown` is false.
    #[error("unknown field '{key}' at {stack}")]
    UnknownField {
        /// The undeclared key.
        key: String,
        /// The containing mapping.
        value: Value,
        /// Path to the containing mapping (does not include `key`).
        stack: Stack,
    },

    /// Schema nesting exceeded the configured recursion limit.
    #[error("maximum nesting depth {limit} exceeded at {stack}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
        /// Path at which the limit was hit.
        stack: Stack,
    },
}

impl NormalizeError {
    /// Path at which normalization failed.
    pub fn stack(&self) -> &Stack {
        match self {
            NormalizeError::BadType { stack, .. }
            | NormalizeError::DictFieldNotFound { stack, .. }
            | NormalizeError::NoneMatched { stack, .. }
            | NormalizeError::UnknownField { stack, .. }
            | NormalizeError::DepthExceeded { stack, .. } => stack,
        }
    }

    /// The value the failure is reported against, if the variant carries one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            NormalizeError::BadType { value, .. }
            | NormalizeError::DictFieldNotFound { value, .. }
            | NormalizeError::NoneMatched { value, .. }
            | NormalizeError::UnknownField { value, .. } => Some(value),
            NormalizeError::DepthExceeded { .. } => None,
        }
    }

    /// Stable snake_case name of the error kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NormalizeError::BadType { .. } => "bad_type",
            NormalizeError::DictFieldNotFound { .. } => "dict_field_not_found",
            NormalizeError::NoneMatched { .. } => "none_matched",
            NormalizeError::UnknownField { .. } => "unknown_field",
            NormalizeError::DepthExceeded { .. } => "depth_exceeded",
        }
    }
}

/// A schema document is malformed.
///
/// `path` locates the offending node inside the schema document itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A schema node is not a mapping.
    #[error("schema at {path} must be a mapping")]
    NotAMapping {
        /// Location in the schema document.
        path: Stack,
    },

    /// A schema node contains a key outside the recognized vocabulary.
    #[error("unrecognized schema key '{key}' at {path}")]
    UnknownKey {
        /// The unrecognized key.
        key: String,
        /// Location in the schema document.
        path: Stack,
    },

    /// `type` names a kind that does not exist.
    #[error("unknown type '{name}' at {path}")]
    UnknownType {
        /// The unrecognized type name.
        name: String,
        /// Location in the schema document.
        path: Stack,
    },

    /// A recognized key holds a value of the wrong shape.
    #[error("schema key '{key}' at {path} must be {expected}")]
    InvalidKey {
        /// The key whose value is wrongly shaped.
        key: String,
        /// Description of the accepted shape.
        expected: &'static str,
        /// Location in the schema document.
        path: Stack,
    },

    /// `anyof` lists no candidates.
    #[error("anyof at {path} must list at least one candidate")]
    EmptyAnyOf {
        /// Location in the schema document.
        path: Stack,
    },
}

impl SchemaError {
    /// Location of the malformed node in the schema document.
    pub fn path(&self) -> &Stack {
        match self {
            SchemaError::NotAMapping { path }
            | SchemaError::UnknownKey { path, .. }
            | SchemaError::UnknownType { path, .. }
            | SchemaError::InvalidKey { path, .. }
            | SchemaError::EmptyAnyOf { path } => path,
        }
    }
}
