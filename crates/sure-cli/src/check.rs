//! # Check Subcommand
//!
//! Parses a schema file without normalizing anything, reporting malformed
//! schemas (unknown keys, unknown types, wrongly shaped rules) and printing
//! the canonical mapping form on success.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sure_core::SureError;
use sure_schema::schema::fields_to_value;
use sure_schema::{load_fields, load_schema};

use crate::config::CliConfig;
use crate::normalize::render;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Treat the schema file as a bare field-name to schema mapping.
    #[arg(long)]
    pub dict: bool,

    /// Only report errors; print nothing on success.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: &CliConfig) -> Result<u8> {
    let parsed = if args.dict {
        load_fields(&args.schema).map(|fields| fields_to_value(&fields))
    } else {
        load_schema(&args.schema).map(|schema| schema.to_value())
    };

    match parsed {
        Ok(canonical) => {
            tracing::info!(schema = %args.schema.display(), "schema is valid");
            if !args.quiet {
                println!("{}", render(&canonical, config.compact)?);
            }
            Ok(0)
        }
        Err(SureError::Schema(e)) => {
            eprintln!("{}: {e}", args.schema.display());
            Ok(2)
        }
        Err(other) => Err(other.into()),
    }
}
