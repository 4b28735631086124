//! # sure-schema — Schema Model & Normalization Engine
//!
//! Given a declarative schema and a candidate value, produces a new value
//! with missing fields filled from defaults and nested structures
//! recursively normalized, or a `NormalizeError` naming what was wrong and
//! where.
//!
//! ## Modules
//!
//! - [`schema`] — the typed `Schema` node and its parser from the plain
//!   mapping representation (`type`, `required`, `default`, `nullable`,
//!   `schema`, `anyof`, `allow_unknown`).
//! - [`builder`] — constructors such as [`Schema::integer`] and
//!   [`sub_schema`] for building schemas in code.
//! - [`normalize`] — the recursive walk: [`normalize_schema`] and
//!   [`normalize_dict`].
//! - [`load`] — reading schemas and documents from JSON/YAML files.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use sure_schema::{field, normalize_dict, Schema};
//!
//! let fields = vec![field("num", Schema::integer().with_default(json!(0)))];
//! let out = normalize_dict(&fields, &json!({})).unwrap();
//! assert_eq!(out, json!({"num": 0}));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `sure-core` internally.
//! - Normalization is a pure function of (schema, value): inputs are never
//!   mutated and no state is shared between calls.

pub mod builder;
pub mod load;
pub mod normalize;
pub mod schema;

pub use builder::{field, sub_schema};
pub use load::{load_document, load_fields, load_schema};
pub use normalize::{
    normalize_dict, normalize_schema, normalize_value_json, NormalizeOptions, Normalizer,
    DEFAULT_MAX_DEPTH,
};
pub use schema::{Field, Rules, Schema};
pub use sure_core::{NormalizeError, SchemaError, Stack, SureError, TypeKind};
