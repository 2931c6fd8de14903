//! Service descriptor and Compose document types
//!
//! `ServiceDescriptor` is the pivot between the two textual forms: a
//! `docker run` line is parsed into one, and a Compose service body is read
//! into one before being rendered as a command.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A list of `KEY=VALUE` strings or a mapping
///
/// Compose accepts both shapes for `environment`, `labels` and
/// `extra_hosts`. A `None` value in the mapping form is a key without a value
/// (for `environment`: pass the variable through from the caller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValues {
    List(Vec<String>),
    Map(IndexMap<String, Option<String>>),
}

impl KeyValues {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }

    /// Flatten to entries, joining mapping pairs with `separator`
    ///
    /// Mapping keys with no value are emitted bare.
    pub fn to_entries(&self, separator: char) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Map(map) => map
                .iter()
                .map(|(key, value)| match value {
                    Some(value) => format!("{key}{separator}{value}"),
                    None => key.clone(),
                })
                .collect(),
        }
    }

    /// Convert to the list form (`KEY=VALUE`)
    pub fn into_list(self) -> Self {
        match self {
            Self::List(_) => self,
            map @ Self::Map(_) => Self::List(map.to_entries('=')),
        }
    }

    /// Convert to the mapping form
    ///
    /// Entries are split on the first `=`; an entry without `=` becomes a key
    /// with no value. Later duplicates overwrite earlier ones.
    pub fn into_map(self) -> Self {
        match self {
            Self::Map(_) => self,
            Self::List(items) => Self::Map(
                items
                    .into_iter()
                    .map(|item| match item.split_once('=') {
                        Some((key, value)) => (key.to_string(), Some(value.to_string())),
                        None => (item, None),
                    })
                    .collect(),
            ),
        }
    }
}

/// A command or entrypoint: exec-form arguments or a single shell string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    Args(Vec<String>),
    Shell(String),
}

impl Command {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Args(args) => args.is_empty(),
            Self::Shell(line) => line.is_empty(),
        }
    }
}

/// How `environment` is written into an emitted Compose document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvStyle {
    /// `- KEY=VALUE` entries
    #[default]
    List,
    /// `KEY: VALUE` pairs
    Map,
}

/// One service, independent of the format it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Image reference; `None` only while building, or for Compose services
    /// that rely on `build`
    pub image: Option<String>,
    /// Container name (`--name` / `container_name`)
    pub name: Option<String>,
    pub ports: Vec<String>,
    pub environment: Option<KeyValues>,
    pub volumes: Vec<String>,
    pub labels: Option<KeyValues>,
    pub extra_hosts: Option<KeyValues>,
    pub command: Option<Command>,
    pub entrypoint: Option<Command>,
    pub working_dir: Option<String>,
    pub user: Option<String>,
    pub restart: Option<String>,
    pub network_mode: Option<String>,
    pub privileged: bool,
    pub tty: bool,
    pub stdin_open: bool,
    pub detach: bool,
    pub rm: bool,
    /// Flags that were recognised as flags but have no mapping
    pub unknown_flags: Vec<String>,
    /// Loss and ambiguity notes, in detection order
    pub notes: Vec<String>,
}

impl ServiceDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to a list-form key/value field, creating it if needed
    pub fn push_entry(field: &mut Option<KeyValues>, entry: String) {
        match field {
            Some(KeyValues::List(items)) => items.push(entry),
            Some(kv @ KeyValues::Map(_)) => {
                let mut entries = kv.to_entries('=');
                entries.push(entry);
                *kv = KeyValues::List(entries);
            }
            None => *field = Some(KeyValues::List(vec![entry])),
        }
    }

    /// Build the Compose service body
    ///
    /// Empty fields are left out; `detach`, `rm`, `unknown_flags` and
    /// `notes` have no Compose key and are not carried over.
    pub fn to_compose_service(&self, env_style: EnvStyle) -> ComposeService {
        let non_empty = |kv: &Option<KeyValues>| kv.clone().filter(|kv| !kv.is_empty());

        ComposeService {
            image: self.image.clone(),
            container_name: self.name.clone(),
            ports: self.ports.clone(),
            environment: non_empty(&self.environment).map(|env| match env_style {
                EnvStyle::List => env.into_list(),
                EnvStyle::Map => env.into_map(),
            }),
            volumes: self.volumes.clone(),
            command: self.command.clone().filter(|c| !c.is_empty()),
            entrypoint: self.entrypoint.clone().filter(|c| !c.is_empty()),
            working_dir: self.working_dir.clone(),
            user: self.user.clone(),
            restart: self.restart.clone(),
            network_mode: self.network_mode.clone(),
            privileged: self.privileged,
            stdin_open: self.stdin_open,
            tty: self.tty,
            labels: non_empty(&self.labels),
            extra_hosts: non_empty(&self.extra_hosts),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A Compose service body, in the key order Dockform emits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<KeyValues>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Command>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub privileged: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub stdin_open: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub tty: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<KeyValues>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_hosts: Option<KeyValues>,
}

/// A Compose document holding only `services`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub services: IndexMap<String, ComposeService>,
}

impl ComposeFile {
    /// A document with exactly one service
    pub fn single(name: impl Into<String>, service: ComposeService) -> Self {
        let mut services = IndexMap::new();
        services.insert(name.into(), service);
        Self { services }
    }
}
