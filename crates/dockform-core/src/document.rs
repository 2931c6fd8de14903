//! Structured document codec
//!
//! The converters only ever need two things from a YAML/JSON library: turn
//! text into a tree of scalars, sequences and mappings, and turn a tree back
//! into text. Everything goes through this module so the rest of the
//! workspace never touches `serde_yaml` or `serde_json` directly.

use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::error::{CoreError, Result};

/// Codec failure
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("YAML parse error: {0}")]
    Parse(serde_yaml::Error),

    #[error("Failed to serialize YAML: {0}")]
    YamlSerialize(serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(serde_json::Error),
}

impl DocumentError {
    /// The underlying parser message, without our prefix
    pub fn parser_message(&self) -> String {
        match self {
            Self::Parse(e) | Self::YamlSerialize(e) => e.to_string(),
            Self::JsonSerialize(e) => e.to_string(),
        }
    }
}

/// Output syntax for [`reformat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Parse YAML text into a document tree
///
/// Empty input parses to `Value::Null`.
pub fn parse(text: &str) -> std::result::Result<Value, DocumentError> {
    serde_yaml::from_str(text).map_err(DocumentError::Parse)
}

/// Parse YAML, falling back to JSON
///
/// If both fail the YAML error is reported, since YAML is the primary syntax.
pub fn parse_any(text: &str) -> std::result::Result<Value, DocumentError> {
    match parse(text) {
        Ok(value) => Ok(value),
        Err(yaml_err) => match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                tracing::debug!("input is not YAML, parsed as JSON");
                Ok(value)
            }
            Err(_) => Err(yaml_err),
        },
    }
}

/// Serialize to YAML without the trailing newline
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> std::result::Result<String, DocumentError> {
    let yaml = serde_yaml::to_string(value).map_err(DocumentError::YamlSerialize)?;
    Ok(yaml.trim().to_string())
}

/// Serialize to pretty JSON (two-space indent)
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> std::result::Result<String, DocumentError> {
    serde_json::to_string_pretty(value).map_err(DocumentError::JsonSerialize)
}

/// Parse YAML or JSON and re-emit it in the requested syntax
pub fn reformat(text: &str, format: Format) -> Result<String> {
    if text.trim().is_empty() {
        return Err(CoreError::empty_input("YAML or JSON"));
    }

    let doc = parse_any(text)?;
    let output = match format {
        Format::Yaml => to_yaml(&doc)?,
        Format::Json => to_json(&doc)?,
    };
    Ok(output)
}

/// Render a scalar the way it reads in a command line
///
/// Strings are returned as-is (empty strings count as absent), numbers in
/// decimal and booleans as `true`/`false`. Sequences, mappings and null
/// return `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Render a mapping key as a string (Compose keys may be bare numbers)
pub fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_mapping() {
        let doc = parse("image: nginx\nports:\n  - 80:80\n").unwrap();
        assert_eq!(doc["image"], Value::String("nginx".into()));
        assert!(doc["ports"].is_sequence());
    }

    #[test]
    fn test_parse_empty_is_null() {
        assert_eq!(parse("").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_error_keeps_parser_message() {
        let err = parse("services: [unclosed").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
        assert!(err.to_string().starts_with("YAML parse error: "));
        assert!(!err.parser_message().starts_with("YAML parse error"));
    }

    #[test]
    fn test_parse_any_accepts_json() {
        let doc = parse_any(r#"{"a": 1, "b": [true, null]}"#).unwrap();
        assert_eq!(doc["a"], Value::Number(1.into()));
    }

    #[test]
    fn test_reformat_yaml_to_json() {
        let json = reformat("name: web\nreplicas: 2\n", Format::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["name"], "web");
        assert_eq!(parsed["replicas"], 2);
        assert!(json.contains("\n  \"name\""));
    }

    #[test]
    fn test_reformat_json_to_yaml() {
        let yaml = reformat(r#"{"name": "web"}"#, Format::Yaml).unwrap();
        assert_eq!(yaml, "name: web");
    }

    #[test]
    fn test_reformat_empty() {
        let err = reformat("  \n", Format::Yaml).unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput { .. }));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&Value::String("x".into())), Some("x".into()));
        assert_eq!(scalar_to_string(&Value::String(String::new())), None);
        assert_eq!(scalar_to_string(&Value::Number(8080.into())), Some("8080".into()));
        assert_eq!(scalar_to_string(&Value::Bool(false)), Some("false".into()));
        assert_eq!(scalar_to_string(&Value::Null), None);
        assert_eq!(scalar_to_string(&Value::Sequence(vec![])), None);
    }
}
