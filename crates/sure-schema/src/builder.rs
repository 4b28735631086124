//! # Schema Builders
//!
//! Convenience constructors that assemble `Schema` values without writing
//! the mapping representation by hand:
//!
//! ```
//! use serde_json::json;
//! use sure_schema::{sub_schema, Field, Schema};
//!
//! let background = Schema::dict(vec![]).with_anyof(vec![
//!     sub_schema(vec![Field::new("gradient", Schema::string())]),
//!     sub_schema(vec![
//!         Field::new("image", Schema::string()),
//!         Field::new("opacity", Schema::integer().with_default(json!(100))),
//!     ]),
//! ]);
//! assert_eq!(background.anyof.as_ref().map(Vec::len), Some(2));
//! ```
//!
//! Typed constructors set `required: true` explicitly.

use serde_json::Value;
use sure_core::TypeKind;

use crate::schema::{Field, Rules, Schema};

impl Schema {
    fn typed(kind: TypeKind) -> Self {
        Schema {
            kind: Some(kind),
            required: Some(true),
            ..Schema::default()
        }
    }

    /// A schema with no type and no rules; accepts any value.
    pub fn any() -> Self {
        Schema::default()
    }

    /// A `dict` schema with the given fields.
    pub fn dict(fields: Vec<Field>) -> Self {
        Schema {
            rules: Some(Rules::Fields(fields)),
            ..Schema::typed(TypeKind::Dict)
        }
    }

    /// A `string` schema.
    pub fn string() -> Self {
        Schema::typed(TypeKind::String)
    }

    /// An `integer` schema.
    pub fn integer() -> Self {
        Schema::typed(TypeKind::Integer)
    }

    /// A `float` schema.
    pub fn float() -> Self {
        Schema::typed(TypeKind::Float)
    }

    /// A `number` schema.
    pub fn number() -> Self {
        Schema::typed(TypeKind::Number)
    }

    /// A `boolean` schema.
    pub fn boolean() -> Self {
        Schema::typed(TypeKind::Boolean)
    }

    /// A `list` schema; `items` normalizes every element when given.
    pub fn list(items: Option<Schema>) -> Self {
        Schema {
            rules: items.map(|s| Rules::Items(Box::new(s))),
            ..Schema::typed(TypeKind::List)
        }
    }

    /// An untyped schema accepting whatever one of `candidates` accepts.
    pub fn any_of(candidates: Vec<Schema>) -> Self {
        Schema::any().with_anyof(candidates)
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Let `null` pass through unchecked.
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Keep undeclared dict keys instead of rejecting them.
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = Some(true);
        self
    }

    /// Substitute `value` when the field is absent.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the ordered `anyof` candidates.
    pub fn with_anyof(mut self, candidates: Vec<Schema>) -> Self {
        self.anyof = Some(candidates);
        self
    }
}

/// An `anyof` candidate carrying only dict fields; it takes its `type`
/// from the schema it is listed in.
pub fn sub_schema(fields: Vec<Field>) -> Schema {
    Schema {
        rules: Some(Rules::Fields(fields)),
        ..Schema::default()
    }
}

/// Shorthand for `Field::new`.
pub fn field(name: impl Into<String>, schema: Schema) -> Field {
    Field::new(name, schema)
}
