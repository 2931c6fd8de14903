//! Compose → `docker run`
//!
//! Each service body is read into a [`ServiceDescriptor`], then rendered as a
//! single `docker run` line. Compose features with no `docker run`
//! equivalent are reported as notes instead of being silently lost.

use dockform_core::document::{self, scalar_to_string};
use dockform_core::env::environment_from_value;
use dockform_core::{Command, KeyValues, ServiceDescriptor};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{ConvertError, Result};
use crate::normalize::{DocumentShape, normalize_services};
use crate::shell::{escape, join_escaped};

/// Placeholder emitted when a service has no `image`
pub const IMAGE_PLACEHOLDER: &str = "IMAGE";

/// One rendered service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCommand {
    pub name: String,
    pub command: String,
    /// Loss notes for this service only
    pub notes: Vec<String>,
}

/// Per-service result of a Compose → run conversion
#[derive(Debug, Clone)]
pub struct RunCommands {
    pub shape: DocumentShape,
    pub services: Vec<ServiceCommand>,
}

impl RunCommands {
    /// All notes, service by service
    pub fn notes(&self) -> Vec<String> {
        self.services
            .iter()
            .flat_map(|svc| svc.notes.iter().cloned())
            .collect()
    }

    /// Join the commands with a blank line between services
    pub fn into_conversion(self) -> RunConversion {
        let notes = self.notes();
        let commands = self
            .services
            .into_iter()
            .map(|svc| svc.command)
            .collect::<Vec<_>>()
            .join("\n\n");
        RunConversion { commands, notes }
    }
}

/// Result of a Compose → run conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConversion {
    /// One `docker run` line per service, separated by a blank line
    pub commands: String,
    /// Loss notes, in detection order
    pub notes: Vec<String>,
}

/// Convert Compose YAML into `docker run` commands
pub fn compose_to_run(text: &str) -> Result<RunConversion> {
    compose_to_run_commands(text).map(RunCommands::into_conversion)
}

/// Convert Compose YAML into one `docker run` command per service
pub fn compose_to_run_commands(text: &str) -> Result<RunCommands> {
    if text.trim().is_empty() {
        return Err(ConvertError::empty_input("Compose file"));
    }

    let doc = document::parse(text).map_err(|e| ConvertError::syntax(&e))?;
    let services = normalize_services(&doc).ok_or_else(ConvertError::no_services)?;
    if services.entries.is_empty() {
        return Err(ConvertError::no_services());
    }

    tracing::debug!(
        shape = ?services.shape,
        count = services.entries.len(),
        "normalized compose document"
    );

    let rendered = services
        .entries
        .iter()
        .map(|(name, body)| {
            let descriptor = read_service(name, body);
            let command = render_run_command(&descriptor);
            tracing::debug!(service = %name, notes = descriptor.notes.len(), "rendered docker run");

            ServiceCommand {
                name: name.clone(),
                command,
                notes: descriptor.notes,
            }
        })
        .collect();

    Ok(RunCommands {
        shape: services.shape,
        services: rendered,
    })
}

/// Read a Compose service body into a descriptor
///
/// Unusable list entries (ports or volumes in neither the short nor the long
/// syntax) are dropped without a note. `build`, `depends_on` and `env_file`
/// add a note naming the service.
pub fn read_service(name: &str, body: &Mapping) -> ServiceDescriptor {
    let string = |key: &str| body.get(key).and_then(scalar_to_string);
    let key_values = |key: &str| body.get(key).and_then(environment_from_value);

    let mut descriptor = ServiceDescriptor {
        image: string("image"),
        name: string("container_name"),
        ports: list(body.get("ports"))
            .into_iter()
            .filter_map(port_entry)
            .collect(),
        environment: key_values("environment"),
        volumes: list(body.get("volumes"))
            .into_iter()
            .filter_map(volume_entry)
            .collect(),
        labels: key_values("labels"),
        extra_hosts: key_values("extra_hosts"),
        command: body.get("command").and_then(command_value),
        entrypoint: body.get("entrypoint").and_then(command_value),
        working_dir: string("working_dir"),
        user: string("user"),
        restart: string("restart"),
        network_mode: string("network_mode"),
        privileged: is_true(body.get("privileged")),
        tty: is_true(body.get("tty")),
        stdin_open: is_true(body.get("stdin_open")),
        ..Default::default()
    };

    if is_set(body.get("build")) {
        descriptor.notes.push(format!(
            "Service \"{name}\" uses build. Replace {IMAGE_PLACEHOLDER} with a built image name."
        ));
    }
    if is_set(body.get("depends_on")) {
        descriptor
            .notes
            .push(format!("Service \"{name}\" depends_on is not represented in docker run."));
    }
    if is_set(body.get("env_file")) {
        descriptor
            .notes
            .push(format!("Service \"{name}\" uses env_file. Add it manually to docker run."));
    }

    descriptor
}

/// Render a descriptor as one `docker run` line
///
/// Flags come in a fixed order, then the image (or `IMAGE`), then the
/// command. Values are escaped; a shell-string command is passed verbatim.
pub fn render_run_command(descriptor: &ServiceDescriptor) -> String {
    let mut args: Vec<String> = vec!["docker".into(), "run".into()];
    let mut flag = |name: &str, value: String| {
        args.push(name.to_string());
        args.push(value);
    };

    if let Some(name) = &descriptor.name {
        flag("--name", escape(name).into_owned());
    }
    if let Some(restart) = &descriptor.restart {
        flag("--restart", escape(restart).into_owned());
    }
    if let Some(network) = &descriptor.network_mode {
        flag("--network", escape(network).into_owned());
    }
    if let Some(user) = &descriptor.user {
        flag("--user", escape(user).into_owned());
    }
    if let Some(workdir) = &descriptor.working_dir {
        flag("--workdir", escape(workdir).into_owned());
    }
    match &descriptor.entrypoint {
        Some(Command::Args(parts)) if parts.is_empty() => flag("--entrypoint", "\"\"".into()),
        Some(Command::Args(parts)) => flag("--entrypoint", join_escaped(parts)),
        Some(Command::Shell(line)) => flag("--entrypoint", escape(line).into_owned()),
        None => {}
    }

    if descriptor.privileged {
        args.push("--privileged".into());
    }
    if descriptor.tty {
        args.push("-t".into());
    }
    if descriptor.stdin_open {
        args.push("-i".into());
    }

    let mut repeated = |name: &str, values: Vec<String>| {
        for value in values {
            args.push(name.to_string());
            args.push(escape(&value).into_owned());
        }
    };
    repeated("-p", descriptor.ports.clone());
    repeated("-e", entries(&descriptor.environment, '='));
    repeated("-v", descriptor.volumes.clone());
    repeated("--label", entries(&descriptor.labels, '='));
    repeated("--add-host", entries(&descriptor.extra_hosts, ':'));

    match &descriptor.image {
        Some(image) => args.push(escape(image).into_owned()),
        None => args.push(IMAGE_PLACEHOLDER.into()),
    }

    match &descriptor.command {
        Some(Command::Args(parts)) if !parts.is_empty() => args.push(join_escaped(parts)),
        Some(Command::Shell(line)) if !line.is_empty() => args.push(line.clone()),
        _ => {}
    }

    args.join(" ")
}

fn entries(field: &Option<KeyValues>, separator: char) -> Vec<String> {
    field
        .as_ref()
        .map(|kv| kv.to_entries(separator))
        .unwrap_or_default()
}

/// Normalize one `ports` entry
///
/// Short syntax (string or number) passes through. Long syntax needs
/// `published`/`host_port` and `target`/`container_port`, with an optional
/// `protocol`.
pub fn port_entry(port: &Value) -> Option<String> {
    match port {
        Value::String(_) | Value::Number(_) => scalar_to_string(port),
        Value::Mapping(spec) => {
            let field = |keys: &[&str]| keys.iter().find_map(|k| spec.get(*k).and_then(scalar_to_string));
            let published = field(&["published", "host_port"])?;
            let target = field(&["target", "container_port"])?;
            Some(match field(&["protocol"]) {
                Some(protocol) => format!("{published}:{target}/{protocol}"),
                None => format!("{published}:{target}"),
            })
        }
        _ => None,
    }
}

/// Normalize one `volumes` entry
///
/// Short syntax passes through. Long syntax needs `source`/`src` and
/// `target`/`dst`/`destination`; `read_only: true` wins over `mode`.
pub fn volume_entry(volume: &Value) -> Option<String> {
    match volume {
        Value::String(_) => scalar_to_string(volume),
        Value::Mapping(spec) => {
            let field = |keys: &[&str]| keys.iter().find_map(|k| spec.get(*k).and_then(scalar_to_string));
            let source = field(&["source", "src"])?;
            let target = field(&["target", "dst", "destination"])?;
            let mode = if is_true(spec.get("read_only")) {
                Some("ro".to_string())
            } else {
                field(&["mode"])
            };
            Some(match mode {
                Some(mode) => format!("{source}:{target}:{mode}"),
                None => format!("{source}:{target}"),
            })
        }
        _ => None,
    }
}

fn command_value(value: &Value) -> Option<Command> {
    match value {
        Value::Sequence(items) => Some(Command::Args(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        other => scalar_to_string(other).map(Command::Shell),
    }
}

/// A list field, accepting a lone scalar as a one-item list
fn list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Whether a key is present with a meaningful value
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
