//! # Document Loading
//!
//! Reads schemas and candidate documents from JSON or YAML files. The
//! format is chosen by extension: `.yaml`/`.yml` are parsed as YAML and
//! converted to JSON values, everything else is parsed as JSON.

use std::path::Path;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;
use sure_core::{Stack, SureError};
use tracing::debug;

use crate::schema::{Field, Schema};

/// Load a JSON or YAML file as a JSON value.
///
/// # Errors
///
/// Returns `SureError::Load` if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, SureError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| load_error(path, format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    debug!(path = %path.display(), ext, "loading document");

    parse_document(path, &content, ext)
}

/// Load a schema file.
///
/// # Errors
///
/// Returns `SureError::Load` for unreadable files and `SureError::Schema`
/// for malformed schemas.
pub fn load_schema(path: &Path) -> Result<Schema, SureError> {
    let doc = load_document(path)?;
    Ok(Schema::from_value(&doc)?)
}

/// Load a bare field-name → schema mapping.
///
/// # Errors
///
/// Same as [`load_schema`].
pub fn load_fields(path: &Path) -> Result<Vec<Field>, SureError> {
    let doc = load_document(path)?;
    Ok(Schema::fields_from_value(&doc)?)
}

/// Parse document text in the format named by `ext`. `path` only labels
/// errors; nothing is read from it.
///
/// # Errors
///
/// Returns `SureError::Load` for syntax errors and for YAML content with no
/// JSON equivalent.
pub fn parse_document(path: &Path, content: &str, ext: &str) -> Result<Value, SureError> {
    match ext {
        "yaml" | "yml" => {
            let yaml: Yaml = serde_yaml::from_str(content)
                .map_err(|e| load_error(path, format!("invalid YAML: {e}")))?;
            YamlConverter { path }.convert(&yaml, &Stack::root())
        }
        _ => serde_json::from_str(content)
            .map_err(|e| load_error(path, format!("invalid JSON: {e}"))),
    }
}

fn load_error(path: &Path, reason: String) -> SureError {
    SureError::Load {
        path: path.display().to_string(),
        reason,
    }
}

/// Walks a parsed YAML tree, building the JSON value and reporting the
/// location of anything JSON cannot hold. Tags are dropped and scalar
/// mapping keys are stringified.
struct YamlConverter<'a> {
    path: &'a Path,
}

impl YamlConverter<'_> {
    fn convert(&self, yaml: &Yaml, at: &Stack) -> Result<Value, SureError> {
        let value = match yaml {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(*b),
            Yaml::String(s) => Value::String(s.clone()),
            Yaml::Number(n) => Value::Number(self.number(n, at)?),
            Yaml::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.convert(item, &at.index(i))?);
                }
                Value::Array(out)
            }
            Yaml::Mapping(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (k, v) in entries {
                    let key = self.key(k, at)?;
                    let converted = self.convert(v, &at.child(key.as_str()))?;
                    out.insert(key, converted);
                }
                Value::Object(out)
            }
            Yaml::Tagged(tagged) => self.convert(&tagged.value, at)?,
        };
        Ok(value)
    }

    fn number(&self, n: &serde_yaml::Number, at: &Stack) -> Result<Number, SureError> {
        if let Some(i) = n.as_i64() {
            return Ok(i.into());
        }
        if let Some(u) = n.as_u64() {
            return Ok(u.into());
        }
        n.as_f64()
            .and_then(Number::from_f64)
            .ok_or_else(|| self.fail(at, format!("number {n} has no JSON representation")))
    }

    fn key(&self, key: &Yaml, at: &Stack) -> Result<String, SureError> {
        match key {
            Yaml::String(s) => Ok(s.clone()),
            Yaml::Number(n) => Ok(n.to_string()),
            Yaml::Bool(b) => Ok(b.to_string()),
            Yaml::Tagged(tagged) => self.key(&tagged.value, at),
            Yaml::Null | Yaml::Sequence(_) | Yaml::Mapping(_) => {
                Err(self.fail(at, "mapping keys must be strings, numbers or booleans".into()))
            }
        }
    }

    fn fail(&self, at: &Stack, reason: String) -> SureError {
        load_error(self.path, format!("{reason} at {at}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use sure_core::TypeKind;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn yaml_schema_loads() {
        let file = write_temp(
            ".yaml",
            r#"
type: dict
schema:
  id: {type: integer}
  opacity:
    type: integer
    default: 100
"#,
        );
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.kind, Some(TypeKind::Dict));
        assert_eq!(schema.field("opacity").unwrap().default, Some(json!(100)));
    }

    #[test]
    fn yaml_preserves_field_order() {
        let file = write_temp(".yml", "zeta: {type: string}\nalpha: {type: string}\n");
        let fields = load_fields(file.path()).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn json_document_loads() {
        let file = write_temp(".json", r#"{"nested": {"num": 3}}"#);
        assert_eq!(load_document(file.path()).unwrap(), json!({"nested": {"num": 3}}));
    }

    #[test]
    fn invalid_json_is_a_load_error() {
        let file = write_temp(".json", "{not json");
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, SureError::Load { ref reason, .. } if reason.starts_with("invalid JSON")));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_document(Path::new("/nonexistent/sure/schema.yaml")).unwrap_err();
        assert!(matches!(err, SureError::Load { .. }));
    }

    #[test]
    fn malformed_schema_is_a_schema_error() {
        let file = write_temp(".json", r#"{"type": "dict", "strict": true}"#);
        let err = load_schema(file.path()).unwrap_err();
        assert!(matches!(err, SureError::Schema(_)));
    }

    #[test]
    fn yaml_to_json_conversion() {
        let content = r#"
name: sure
count: 42
ratio: 0.5
enabled: true
items: [one, two]
1: numeric-key
nothing: null
"#;
        let value = parse_document(Path::new("inline.yaml"), content, "yaml").unwrap();
        assert_eq!(value["name"], "sure");
        assert_eq!(value["count"], 42);
        assert_eq!(value["ratio"], 0.5);
        assert_eq!(value["enabled"], true);
        assert_eq!(value["items"][1], "two");
        assert_eq!(value["1"], "numeric-key");
        assert!(value["nothing"].is_null());
    }

    #[test]
    fn yaml_integers_stay_integers() {
        let path = Path::new("n.yaml");
        let value = parse_document(path, "n: 7", "yaml").unwrap();
        assert!(TypeKind::Integer.matches(&value["n"]));
        let value = parse_document(path, "n: 7.0", "yaml").unwrap();
        assert!(TypeKind::Float.matches(&value["n"]));
    }

    #[test]
    fn yaml_non_scalar_key_reports_its_location() {
        let file = write_temp(".yaml", "outer:\n  inner:\n    ? [a, b]\n    : x\n");
        let err = load_document(file.path()).unwrap_err();
        match err {
            SureError::Load { path, reason } => {
                assert_eq!(path, file.path().display().to_string());
                assert!(reason.starts_with("mapping keys must be"), "{reason}");
                assert!(reason.ends_with("at outer.inner"), "{reason}");
            }
            other => panic!("expected Load, got {other:?}"),
        }
    }

    #[test]
    fn yaml_non_finite_float_reports_its_location() {
        let err = parse_document(Path::new("f.yaml"), "items: [1, .inf]", "yaml").unwrap_err();
        assert!(
            matches!(err, SureError::Load { ref reason, .. } if reason.ends_with("at items[1]")),
            "{err:?}"
        );
    }
}
