//! # sure-core — Foundational Types for the sure Normalizer
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the closed set of schema type kinds, the path ("stack") that
//! locates a failure inside a nested value, and the structured error
//! taxonomy returned by normalization.
//!
//! ## Key Design Principles
//!
//! 1. **Closed type kinds.** `TypeKind` is a single enum with an exhaustive
//!    runtime predicate over `serde_json::Value`. Adding a kind forces every
//!    consumer to handle it.
//!
//! 2. **Typed errors, not strings.** Every failure is a `NormalizeError`
//!    variant carrying the offending value and its `Stack`, so callers can
//!    inspect failures programmatically.
//!
//! 3. **Immutable paths.** `Stack::child()` and `Stack::index()` return new
//!    stacks; no normalization step ever mutates a caller's path.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sure-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod kind;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use error::{NormalizeError, SchemaError, SureError};
pub use kind::TypeKind;
pub use path::{PathSegment, Stack};
