//! # sure-cli — Schema Normalization Command-Line Interface
//!
//! ## Subcommands
//!
//! - `normalize` — normalize a JSON/YAML document against a schema file
//! - `check` — validate a schema file and print its canonical form
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `sure-schema`; no normalization logic here.
//! - Handlers return the process exit code: 0 success, 2 rejected input.
//!   Load and I/O failures propagate as `anyhow` errors (exit 1).

pub mod check;
pub mod config;
pub mod normalize;
