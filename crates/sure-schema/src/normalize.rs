//! # Normalization
//!
//! Walks a value alongside its schema and produces a new value with
//! defaults filled in, or a `NormalizeError` locating the first failure.
//!
//! ## Precedence (per schema node)
//!
//! 1. `nullable` and the value is `null`: returned unchanged.
//! 2. `anyof`: candidates tried in declared order, first success wins.
//!    Each candidate is applied on top of the enclosing schema
//!    (see [`Schema::overlay`]).
//! 3. `type: dict`: field-by-field normalization.
//! 4. `type: list`: element-by-element normalization when an element
//!    schema is declared.
//! 5. Scalar types: runtime type check, value returned unchanged.
//!
//! Input values are never mutated. Errors propagate immediately except
//! inside `anyof`, where a candidate failure means "try the next one".

use serde_json::{Map, Value};
use sure_core::{NormalizeError, Stack, SureError, TypeKind};
use tracing::{debug, trace};

use crate::schema::{Field, Rules, Schema};

/// Default limit on value nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for a [`Normalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Maximum length of the stack before normalization fails with
    /// `DepthExceeded`.
    pub max_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Normalizes values against schemas.
///
/// Holds no mutable state; one instance can be shared freely across
/// threads and calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize `value` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first `NormalizeError` encountered.
    pub fn normalize_schema(&self, schema: &Schema, value: &Value) -> Result<Value, NormalizeError> {
        debug!(kind = ?schema.kind, "normalizing value against schema");
        self.schema_at(schema, value, &Stack::root())
    }

    /// Normalize a mapping against bare field schemas.
    ///
    /// # Errors
    ///
    /// Returns `BadType` if `value` is not a mapping, otherwise the first
    /// field failure.
    pub fn normalize_dict(
        &self,
        fields: &[Field],
        value: &Value,
        allow_unknown: bool,
    ) -> Result<Value, NormalizeError> {
        debug!(fields = fields.len(), allow_unknown, "normalizing dict");
        self.dict_at(fields, value, allow_unknown, &Stack::root())
    }

    fn schema_at(&self, schema: &Schema, value: &Value, stack: &Stack) -> Result<Value, NormalizeError> {
        if stack.len() > self.options.max_depth {
            return Err(NormalizeError::DepthExceeded {
                limit: self.options.max_depth,
                stack: stack.clone(),
            });
        }

        if schema.is_nullable() && value.is_null() {
            return Ok(Value::Null);
        }

        if let Some(candidates) = &schema.anyof {
            return self.any_of(schema, candidates, value, stack);
        }

        match schema.kind {
            Some(TypeKind::Dict) => {
                self.dict_at(schema.fields(), value, schema.allows_unknown(), stack)
            }
            Some(TypeKind::List) => self.list_at(schema.items(), value, stack),
            Some(kind) if kind.matches(value) => Ok(value.clone()),
            Some(kind) => Err(bad_type(value, kind, stack)),
            // Untyped: only structural rules that fit the value's shape apply.
            None => match (&schema.rules, value) {
                (Some(Rules::Fields(fields)), Value::Object(_)) => {
                    self.dict_at(fields, value, schema.allows_unknown(), stack)
                }
                (Some(Rules::Items(items)), Value::Array(_)) => {
                    self.list_at(Some(items.as_ref()), value, stack)
                }
                _ => Ok(value.clone()),
            },
        }
    }

    fn any_of(
        &self,
        schema: &Schema,
        candidates: &[Schema],
        value: &Value,
        stack: &Stack,
    ) -> Result<Value, NormalizeError> {
        let mut failures = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            match self.schema_at(&schema.overlay(candidate), value, stack) {
                Ok(normalized) => {
                    trace!(candidate = i, %stack, "anyof candidate matched");
                    return Ok(normalized);
                }
                Err(e) => {
                    trace!(candidate = i, %stack, error = %e, "anyof candidate rejected");
                    failures.push(e);
                }
            }
        }
        Err(NormalizeError::NoneMatched {
            value: value.clone(),
            stack: stack.clone(),
            failures,
        })
    }

    fn dict_at(
        &self,
        fields: &[Field],
        value: &Value,
        allow_unknown: bool,
        stack: &Stack,
    ) -> Result<Value, NormalizeError> {
        let input = value
            .as_object()
            .ok_or_else(|| bad_type(value, TypeKind::Dict, stack))?;

        let mut out = Map::with_capacity(input.len().max(fields.len()));
        for field in fields {
            match input.get(&field.name) {
                Some(v) => {
                    let normalized =
                        self.schema_at(&field.schema, v, &stack.child(field.name.as_str()))?;
                    out.insert(field.name.clone(), normalized);
                }
                None => {
                    if let Some(default) = &field.schema.default {
                        out.insert(field.name.clone(), default.clone());
                    } else if field.schema.is_required() {
                        return Err(NormalizeError::DictFieldNotFound {
                            key: field.name.clone(),
                            value: value.clone(),
                            stack: stack.clone(),
                        });
                    }
                }
            }
        }

        for (key, v) in input {
            if fields.iter().any(|f| &f.name == key) {
                continue;
            }
            if !allow_unknown {
                return Err(NormalizeError::UnknownField {
                    key: key.clone(),
                    value: value.clone(),
                    stack: stack.clone(),
                });
            }
            out.insert(key.clone(), v.clone());
        }

        Ok(Value::Object(out))
    }

    fn list_at(&self, items: Option<&Schema>, value: &Value, stack: &Stack) -> Result<Value, NormalizeError> {
        let elements = value
            .as_array()
            .ok_or_else(|| bad_type(value, TypeKind::List, stack))?;
        let Some(items) = items else {
            return Ok(value.clone());
        };
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| self.schema_at(items, element, &stack.index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

fn bad_type(value: &Value, type_: TypeKind, stack: &Stack) -> NormalizeError {
    NormalizeError::BadType {
        value: value.clone(),
        type_,
        stack: stack.clone(),
    }
}

/// Normalize `value` against `schema` with default options.
///
/// # Errors
///
/// Returns the first `NormalizeError` encountered.
pub fn normalize_schema(schema: &Schema, value: &Value) -> Result<Value, NormalizeError> {
    Normalizer::default().normalize_schema(schema, value)
}

/// Normalize a mapping against bare field schemas with default options.
///
/// Equivalent to `normalize_schema` with `{type: dict, schema: fields}`:
/// undeclared keys are rejected.
///
/// # Errors
///
/// Returns the first `NormalizeError` encountered.
pub fn normalize_dict(fields: &[Field], value: &Value) -> Result<Value, NormalizeError> {
    Normalizer::default().normalize_dict(fields, value, false)
}

/// Parse a schema document and normalize `value` against it.
///
/// # Errors
///
/// Returns `SureError::Schema` for a malformed schema document and
/// `SureError::Normalize` when the value does not normalize.
pub fn normalize_value_json(schema_doc: &Value, value: &Value) -> Result<Value, SureError> {
    let schema = Schema::from_value(schema_doc)?;
    Ok(normalize_schema(&schema, value)?)
}
