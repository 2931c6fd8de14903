//! Compose document normalization
//!
//! Users paste whole Compose files, bare service bodies, or a mapping of a
//! few services without the `services:` wrapper. This module decides which
//! one it is and returns the services in document order.

use dockform_core::document::key_to_string;
use serde_yaml::{Mapping, Value};

/// Keys whose presence marks a mapping as a service body
pub const SERVICE_INDICATOR_KEYS: [&str; 6] =
    ["image", "build", "command", "ports", "environment", "volumes"];

/// Service name used when the whole document is a single service body
pub const SINGLE_SERVICE_NAME: &str = "service";

/// Which shape the document was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// A `services:` mapping
    ServicesBlock,
    /// The document itself is one service body
    SingleService,
    /// Top-level entries that each look like a service body
    ServiceMap,
}

/// Normalized services, in document order
#[derive(Debug, Clone)]
pub struct Services<'a> {
    pub shape: DocumentShape,
    pub entries: Vec<(String, &'a Mapping)>,
}

/// Whether a mapping has at least one service indicator key
pub fn looks_like_service(body: &Mapping) -> bool {
    SERVICE_INDICATOR_KEYS
        .iter()
        .any(|key| body.contains_key(*key))
}

/// Find the services in a parsed Compose document
///
/// First match wins:
/// 1. a `services` key holding a mapping
/// 2. the document's own keys look like a service body
/// 3. top-level values that look like service bodies
///
/// Returns `None` when nothing service-shaped is found.
pub fn normalize_services(doc: &Value) -> Option<Services<'_>> {
    let Value::Mapping(root) = strip_tag(doc) else {
        return None;
    };

    if let Some(Value::Mapping(services)) = root.get("services").map(strip_tag) {
        return Some(Services {
            shape: DocumentShape::ServicesBlock,
            entries: service_entries(services),
        });
    }

    if looks_like_service(root) {
        return Some(Services {
            shape: DocumentShape::SingleService,
            entries: vec![(SINGLE_SERVICE_NAME.to_string(), root)],
        });
    }

    let entries: Vec<(String, &Mapping)> = root
        .iter()
        .filter_map(|(key, value)| match strip_tag(value) {
            Value::Mapping(body) if looks_like_service(body) => Some((key_to_string(key)?, body)),
            _ => None,
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(Services {
            shape: DocumentShape::ServiceMap,
            entries,
        })
    }
}

/// Entries of a `services:` block
///
/// A service whose body is not a mapping (`web:` with nothing under it, or a
/// stray scalar) is kept with an empty mapping, so it still renders as an
/// `IMAGE` placeholder.
fn service_entries(services: &Mapping) -> Vec<(String, &Mapping)> {
    static EMPTY: once_cell::sync::Lazy<Mapping> = once_cell::sync::Lazy::new(Mapping::new);

    services
        .iter()
        .filter_map(|(key, value)| {
            let name = key_to_string(key)?;
            match strip_tag(value) {
                Value::Mapping(body) => Some((name, body)),
                _ => Some((name, &*EMPTY)),
            }
        })
        .collect()
}

fn strip_tag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => strip_tag(&tagged.value),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockform_core::document::parse;

    fn names(services: &Services<'_>) -> Vec<String> {
        services.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    #[test]
    fn test_services_block() {
        let doc = parse("version: '3'\nservices:\n  web:\n    image: nginx\n  db:\n    image: postgres\n").unwrap();
        let services = normalize_services(&doc).unwrap();

        assert_eq!(services.shape, DocumentShape::ServicesBlock);
        assert_eq!(names(&services), vec!["web", "db"]);
    }

    #[test]
    fn test_services_block_keeps_services_without_indicator_keys() {
        let doc = parse("services:\n  worker:\n    depends_on: [db]\n  db:\n  cache: redis\n").unwrap();
        let services = normalize_services(&doc).unwrap();

        assert_eq!(names(&services), vec!["worker", "db", "cache"]);
        assert!(services.entries[2].1.is_empty());
    }

    #[test]
    fn test_single_service_body() {
        let doc = parse("image: redis\nports:\n  - 6379:6379\n").unwrap();
        let services = normalize_services(&doc).unwrap();

        assert_eq!(services.shape, DocumentShape::SingleService);
        assert_eq!(names(&services), vec![SINGLE_SERVICE_NAME]);
    }

    #[test]
    fn test_service_map_without_wrapper() {
        let doc = parse("web:\n  image: nginx\napp:\n  build: .\nnetworks:\n  default: {}\n").unwrap();
        let services = normalize_services(&doc).unwrap();

        assert_eq!(services.shape, DocumentShape::ServiceMap);
        assert_eq!(names(&services), vec!["web", "app"]);
    }

    #[test]
    fn test_service_map_drops_bodies_without_indicator_keys() {
        // Known gap of the heuristic: `worker` has no indicator key, so it is
        // not recognised as a service when the `services:` wrapper is missing.
        let doc = parse("web:\n  image: nginx\nworker:\n  depends_on: [web]\n  restart: always\n").unwrap();
        let services = normalize_services(&doc).unwrap();

        assert_eq!(names(&services), vec!["web"]);
    }

    #[test]
    fn test_numeric_service_name() {
        let doc = parse("1:\n  image: busybox\n").unwrap();
        let services = normalize_services(&doc).unwrap();
        assert_eq!(names(&services), vec!["1"]);
    }

    #[test]
    fn test_no_services() {
        for text in ["foo: bar", "- a\n- b", "just text", "", "services: [a, b]"] {
            let doc = parse(text).unwrap();
            assert!(normalize_services(&doc).is_none(), "{text:?} should not normalize");
        }
    }

    #[test]
    fn test_looks_like_service() {
        let body: Mapping = serde_yaml::from_str("build: .").unwrap();
        assert!(looks_like_service(&body));

        let body: Mapping = serde_yaml::from_str("restart: always").unwrap();
        assert!(!looks_like_service(&body));
    }
}
