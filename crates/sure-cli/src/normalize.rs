//! # Normalize Subcommand
//!
//! Normalizes a JSON or YAML document against a schema file and prints the
//! result.
//!
//! ## Usage
//!
//! ```bash
//! # Full schema document:
//! sure normalize --schema background.yaml layer.json
//!
//! # Bare field mapping, written to a file:
//! sure normalize --schema fields.yaml --dict config.yaml --output out.json
//! ```
//!
//! Exit codes: 0 on success, 2 when the document does not normalize.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use sure_core::NormalizeError;
use sure_schema::{load_document, load_fields, load_schema, Normalizer};

use crate::config::CliConfig;

/// Arguments for the normalize subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Document to normalize (JSON or YAML).
    pub document: PathBuf,

    /// Treat the schema file as a bare field-name to schema mapping.
    #[arg(long)]
    pub dict: bool,

    /// With --dict, keep keys that have no declared field.
    #[arg(long, requires = "dict")]
    pub allow_unknown: bool,

    /// Write the normalized document here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print JSON without indentation.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs, config: &CliConfig) -> Result<u8> {
    let document = load_document(&args.document)
        .with_context(|| format!("failed to load document {}", args.document.display()))?;
    let result = normalize_file(args, config, &document)?;

    match result {
        Ok(normalized) => {
            let text = render(&normalized, args.compact || config.compact)?;
            match &args.output {
                Some(path) => write_output(path, &text)?,
                None => println!("{text}"),
            }
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(kind = e.kind_name(), stack = %e.stack(), "normalization failed");
            eprint!("{}", describe_failure(&e));
            Ok(2)
        }
    }
}

fn normalize_file(
    args: &NormalizeArgs,
    config: &CliConfig,
    document: &Value,
) -> Result<Result<Value, NormalizeError>> {
    let normalizer = Normalizer::new(config.normalize_options());
    let schema_path = &args.schema;
    if args.dict {
        let fields = load_fields(schema_path)
            .with_context(|| format!("failed to load field schemas {}", schema_path.display()))?;
        Ok(normalizer.normalize_dict(&fields, document, args.allow_unknown))
    } else {
        let schema = load_schema(schema_path)
            .with_context(|| format!("failed to load schema {}", schema_path.display()))?;
        Ok(normalizer.normalize_schema(&schema, document))
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, format!("{text}\n"))
        .with_context(|| format!("failed to write output: {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote normalized document");
    Ok(())
}

/// Serialize a value as pretty or compact JSON.
pub fn render(value: &Value, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

/// Human-readable report of a normalization failure, including the
/// per-candidate failures of `anyof` mismatches.
pub fn describe_failure(err: &NormalizeError) -> String {
    let mut out = String::new();
    describe_into(&mut out, err, 0);
    out
}

fn describe_into(out: &mut String, err: &NormalizeError, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{indent}error[{}] at {}: {err}\n",
        err.kind_name(),
        err.stack()
    ));
    if let NormalizeError::NoneMatched { failures, .. } = err {
        for (i, failure) in failures.iter().enumerate() {
            out.push_str(&format!("{indent}  candidate {i}:\n"));
            describe_into(out, failure, depth + 2);
        }
    }
}
