//! `.env` lists ↔ Compose `environment` blocks

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::document::{self, key_to_string, scalar_to_string};
use crate::error::{CoreError, Result};
use crate::service::KeyValues;

#[derive(Serialize)]
struct EnvironmentBlock {
    environment: KeyValues,
}

/// Split text into trimmed, non-empty lines
pub fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Split `.env` text into entries, dropping blank lines and `#` comments
pub fn parse_env_lines(text: &str) -> Vec<String> {
    lines(text)
        .into_iter()
        .filter(|line| !line.starts_with('#'))
        .collect()
}

/// Convert `.env` text into a Compose `environment:` mapping
///
/// `KEY=VALUE` becomes `KEY: VALUE`, a bare `KEY` becomes `KEY: null`.
pub fn dotenv_to_compose(text: &str) -> Result<String> {
    let entries = parse_env_lines(text);
    if entries.is_empty() {
        return Err(CoreError::empty_input(".env values"));
    }

    let environment = KeyValues::List(entries).into_map();
    tracing::debug!("converted {} .env entries", environment.to_entries('=').len());

    Ok(document::to_yaml(&EnvironmentBlock { environment })?)
}

/// Convert a Compose `environment` block back into `.env` lines
///
/// Accepts a document with an `environment` key, or a bare list/mapping.
pub fn compose_to_dotenv(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(CoreError::empty_input("a Compose environment block"));
    }

    let doc = document::parse(text)?;
    let env = match doc.get("environment") {
        Some(env) if !env.is_null() => env,
        _ => &doc,
    };

    let entries = environment_entries(env).ok_or_else(|| CoreError::missing_field("environment"))?;
    Ok(entries.join("\n"))
}

/// Read an `environment` value (list or mapping) into `KeyValues`
///
/// Returns `None` for null and plain scalars.
pub fn environment_from_value(value: &Value) -> Option<KeyValues> {
    match value {
        Value::Sequence(items) => Some(KeyValues::List(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        Value::Mapping(mapping) => {
            let map: IndexMap<String, Option<String>> = mapping
                .iter()
                .filter_map(|(key, value)| Some((key_to_string(key)?, env_value(value))))
                .collect();
            Some(KeyValues::Map(map))
        }
        Value::Tagged(tagged) => environment_from_value(&tagged.value),
        _ => None,
    }
}

/// Like `scalar_to_string`, but an empty string is still a value (`KEY=`)
fn env_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => scalar_to_string(other),
    }
}

fn environment_entries(value: &Value) -> Option<Vec<String>> {
    environment_from_value(value).map(|env| env.to_entries('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_lines_skips_comments() {
        let entries = parse_env_lines("# comment\nFOO=bar\n\n  BAZ  \n");
        assert_eq!(entries, vec!["FOO=bar", "BAZ"]);
    }

    #[test]
    fn test_dotenv_to_compose() {
        let yaml = dotenv_to_compose("FOO=bar\nEMPTY=\nPASSTHROUGH\n").unwrap();
        let doc = document::parse(&yaml).unwrap();

        assert_eq!(doc["environment"]["FOO"], Value::String("bar".into()));
        assert_eq!(doc["environment"]["EMPTY"], Value::String(String::new()));
        assert_eq!(doc["environment"]["PASSTHROUGH"], Value::Null);
    }

    #[test]
    fn test_dotenv_to_compose_empty() {
        let err = dotenv_to_compose("# only a comment\n").unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput { .. }));
    }

    #[test]
    fn test_compose_to_dotenv_mapping() {
        let text = "environment:\n  FOO: bar\n  PORT: 8080\n  EMPTY: ''\n  TOKEN:\n";
        assert_eq!(compose_to_dotenv(text).unwrap(), "FOO=bar\nPORT=8080\nEMPTY=\nTOKEN");
    }

    #[test]
    fn test_compose_to_dotenv_bare_list() {
        let text = "- FOO=bar\n- DEBUG\n";
        assert_eq!(compose_to_dotenv(text).unwrap(), "FOO=bar\nDEBUG");
    }

    #[test]
    fn test_compose_to_dotenv_no_data() {
        let err = compose_to_dotenv("just a string").unwrap_err();
        assert!(matches!(err, CoreError::MissingField { .. }));
    }

    #[test]
    fn test_compose_to_dotenv_parse_error() {
        let err = compose_to_dotenv("environment: [oops").unwrap_err();
        assert!(matches!(err, CoreError::Document(_)));
    }
}
