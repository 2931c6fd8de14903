//! `docker run` → Compose
//!
//! The command line is tokenized, then walked left to right with an explicit
//! cursor: flags fill a [`ServiceDescriptor`], the first positional that is
//! not `docker`/`run` is the image, and everything after it is the command.
//! The descriptor is then written out as a one-service Compose document.

use dockform_core::{Command, ComposeFile, EnvStyle, ServiceDescriptor, document};
use serde::Serialize;

use crate::error::{ConvertError, Result};
use crate::flags::{Switch, TokenKind, ValueFlag, classify};
use crate::normalize::SINGLE_SERVICE_NAME;
use crate::shell::tokenize;

/// Options for run → Compose
#[derive(Debug, Clone, Copy, Default)]
pub struct RunToComposeOptions {
    /// Shape of the emitted `environment` key
    pub environment_style: EnvStyle,
}

/// Result of a run → Compose conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeConversion {
    /// Name of the single emitted service
    pub service: String,
    /// The Compose document, as YAML
    pub document: String,
    /// Loss notes, in detection order
    pub notes: Vec<String>,
}

/// Convert a `docker run` command into a Compose document
pub fn run_to_compose(text: &str) -> Result<ComposeConversion> {
    run_to_compose_with_options(text, RunToComposeOptions::default())
}

/// Convert with options
pub fn run_to_compose_with_options(
    text: &str,
    options: RunToComposeOptions,
) -> Result<ComposeConversion> {
    let descriptor = parse_run_command(text)?;
    let image = descriptor.image.as_deref().unwrap_or_default();

    let service = match descriptor.name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => sanitize_service_name(name),
        None => sanitize_service_name(&derive_service_name(image)),
    };
    tracing::debug!(service = %service, image = %image, "built compose service");

    let compose = ComposeFile::single(
        service.clone(),
        descriptor.to_compose_service(options.environment_style),
    );
    let document = document::to_yaml(&compose)?;

    Ok(ComposeConversion {
        service,
        document,
        notes: descriptor.notes,
    })
}

/// Parse a `docker run` command line into a descriptor
///
/// Fails on blank input, and when no image is found. The descriptor's notes
/// already include the detach/rm/unsupported-flag notes.
pub fn parse_run_command(text: &str) -> Result<ServiceDescriptor> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(ConvertError::empty_input("docker run command"));
    }
    tracing::debug!(count = tokens.len(), "tokenized docker run command");

    let mut descriptor = parse_tokens(&tokens)?;
    add_loss_notes(&mut descriptor);
    Ok(descriptor)
}

/// Walk the tokens and fill a descriptor
///
/// Does not add the post-parse notes, see [`parse_run_command`].
pub fn parse_tokens(tokens: &[String]) -> Result<ServiceDescriptor> {
    let mut descriptor = ServiceDescriptor::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let token = tokens[cursor].as_str();
        let kind = classify(token);
        tracing::trace!(token, ?kind, "classified token");

        match kind {
            TokenKind::Preamble => cursor += 1,
            TokenKind::Inline(flag, value) => {
                apply_value(&mut descriptor, flag, value.to_string());
                cursor += 1;
            }
            TokenKind::Value(flag) => match tokens.get(cursor + 1) {
                Some(value) => {
                    apply_value(&mut descriptor, flag, value.clone());
                    cursor += 2;
                }
                None => {
                    // Trailing flag with nothing after it
                    descriptor.unknown_flags.push(token.to_string());
                    cursor += 1;
                }
            },
            TokenKind::Switch(switch) => {
                apply_switch(&mut descriptor, switch);
                cursor += 1;
            }
            TokenKind::EndOfFlags => {
                descriptor.command = Some(Command::Args(tokens[cursor + 1..].to_vec()));
                break;
            }
            TokenKind::Unknown => {
                descriptor.unknown_flags.push(token.to_string());
                cursor += 1;
            }
            // An empty quoted word is not an image
            TokenKind::Positional if token.is_empty() => break,
            TokenKind::Positional => {
                descriptor.image = Some(token.to_string());
                descriptor.command = Some(Command::Args(tokens[cursor + 1..].to_vec()));
                break;
            }
        }
    }

    if descriptor.image.is_none() {
        return Err(ConvertError::missing_image());
    }
    Ok(descriptor)
}

/// Empty values (`--name ""`) leave the field unset
fn apply_value(descriptor: &mut ServiceDescriptor, flag: ValueFlag, value: String) {
    if value.is_empty() {
        return;
    }
    match flag {
        ValueFlag::Name => descriptor.name = Some(value),
        ValueFlag::Restart => descriptor.restart = Some(value),
        ValueFlag::Network => descriptor.network_mode = Some(value),
        ValueFlag::Entrypoint => descriptor.entrypoint = Some(Command::Shell(value)),
        ValueFlag::Workdir => descriptor.working_dir = Some(value),
        ValueFlag::User => descriptor.user = Some(value),
        ValueFlag::Env => ServiceDescriptor::push_entry(&mut descriptor.environment, value),
        ValueFlag::Publish => descriptor.ports.push(value),
        ValueFlag::Volume => descriptor.volumes.push(value),
        ValueFlag::Label => ServiceDescriptor::push_entry(&mut descriptor.labels, value),
        ValueFlag::AddHost => ServiceDescriptor::push_entry(&mut descriptor.extra_hosts, value),
        ValueFlag::EnvFile => descriptor.notes.push(format!("env-file: {value}")),
    }
}

fn apply_switch(descriptor: &mut ServiceDescriptor, switch: Switch) {
    match switch {
        Switch::Privileged => descriptor.privileged = true,
        Switch::Interactive => descriptor.stdin_open = true,
        Switch::Tty => descriptor.tty = true,
        Switch::InteractiveTty => {
            descriptor.stdin_open = true;
            descriptor.tty = true;
        }
        Switch::Rm => descriptor.rm = true,
        Switch::Detach => descriptor.detach = true,
    }
}

fn add_loss_notes(descriptor: &mut ServiceDescriptor) {
    if descriptor.detach {
        descriptor
            .notes
            .push("docker run -d maps to docker compose up -d, not a compose key.".to_string());
    }
    if descriptor.rm {
        descriptor
            .notes
            .push("docker run --rm is not a compose key. Use docker compose run --rm.".to_string());
    }
    if !descriptor.unknown_flags.is_empty() {
        let flags = descriptor.unknown_flags.join(", ");
        descriptor.notes.push(format!("Unsupported flags: {flags}"));
    }
}

/// Lowercase and keep `[a-z0-9_-]`, falling back to `service`
pub fn sanitize_service_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'))
        .collect();

    if cleaned.is_empty() {
        SINGLE_SERVICE_NAME.to_string()
    } else {
        cleaned
    }
}

/// Service name from an image reference
///
/// `ghcr.io/acme/My.App:1.2` → `myapp`. Falls back to `service`.
pub fn derive_service_name(image: &str) -> String {
    let last_segment = image.rsplit('/').next().unwrap_or(image);
    let repository = last_segment.split(':').next().unwrap_or(last_segment);
    let cleaned: String = repository
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect::<String>()
        .to_lowercase();

    if cleaned.is_empty() {
        SINGLE_SERVICE_NAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockform_core::{ComposeService, KeyValues};
    use insta::assert_snapshot;

    fn parse(text: &str) -> ServiceDescriptor {
        parse_run_command(text).unwrap()
    }

    fn service_of(conversion: &ComposeConversion) -> ComposeService {
        let file: ComposeFile = serde_yaml::from_str(&conversion.document).unwrap();
        file.services[&conversion.service].clone()
    }

    fn list(items: &[&str]) -> Option<KeyValues> {
        Some(KeyValues::List(items.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn test_flag_classification() {
        let d = parse("docker run -d --rm -p 8080:80 -e FOO=bar myimage:latest echo hi");

        assert!(d.detach);
        assert!(d.rm);
        assert_eq!(d.ports, vec!["8080:80"]);
        assert_eq!(d.environment, list(&["FOO=bar"]));
        assert_eq!(d.image.as_deref(), Some("myimage:latest"));
        assert_eq!(d.command, Some(Command::Args(vec!["echo".into(), "hi".into()])));
        assert_eq!(d.notes.len(), 2);
        assert!(d.notes[0].contains("-d"));
        assert!(d.notes[1].contains("--rm"));
    }

    #[test]
    fn test_long_short_and_inline_forms() {
        let d = parse(
            "docker run --name=web --restart always --network=backend --workdir=/srv -u 1000 \
             --env=A=1 -eB=2 --publish=80:80 -p443:443 --volume=/a:/b -v/c:/d \
             -l tier=web --label=team=core --add-host=db:10.0.0.2 --entrypoint=/init \
             --privileged -it nginx",
        );

        assert_eq!(d.name.as_deref(), Some("web"));
        assert_eq!(d.restart.as_deref(), Some("always"));
        assert_eq!(d.network_mode.as_deref(), Some("backend"));
        assert_eq!(d.working_dir.as_deref(), Some("/srv"));
        assert_eq!(d.user.as_deref(), Some("1000"));
        assert_eq!(d.environment, list(&["A=1", "B=2"]));
        assert_eq!(d.ports, vec!["80:80", "443:443"]);
        assert_eq!(d.volumes, vec!["/a:/b", "/c:/d"]);
        assert_eq!(d.labels, list(&["tier=web", "team=core"]));
        assert_eq!(d.extra_hosts, list(&["db:10.0.0.2"]));
        assert_eq!(d.entrypoint, Some(Command::Shell("/init".into())));
        assert!(d.privileged && d.stdin_open && d.tty);
        assert_eq!(d.image.as_deref(), Some("nginx"));
        assert!(d.notes.is_empty());
    }

    #[test]
    fn test_double_dash_ends_flags_before_image() {
        let err = parse_run_command("docker run -- nginx -v").unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field: "image", .. }));
    }

    #[test]
    fn test_command_keeps_dashes_after_image() {
        let d = parse("docker run --rm alpine ls -la --color=auto");
        assert_eq!(
            d.command,
            Some(Command::Args(vec!["ls".into(), "-la".into(), "--color=auto".into()]))
        );
        assert!(d.unknown_flags.is_empty());
    }

    #[test]
    fn test_unknown_flags_are_noted() {
        let d = parse("docker run --memory 512m --cpus=2 -x alpine");

        // `--memory` is not in the table, so its value `512m` reads as the image
        assert_eq!(d.image.as_deref(), Some("512m"));
        assert_eq!(d.unknown_flags, vec!["--memory"]);

        let d = parse("docker run --cpus=2 -x alpine");
        assert_eq!(d.image.as_deref(), Some("alpine"));
        assert_eq!(d.notes, vec!["Unsupported flags: --cpus=2, -x"]);
    }

    #[test]
    fn test_env_file_note() {
        let d = parse("docker run --env-file .env --env-file=prod.env -d app");
        assert_eq!(
            d.notes,
            vec![
                "env-file: .env",
                "env-file: prod.env",
                "docker run -d maps to docker compose up -d, not a compose key.",
            ]
        );
        assert!(d.environment.is_none());
    }

    #[test]
    fn test_trailing_value_flag_is_unknown() {
        let err = parse_run_command("docker run -p").unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { .. }));

        let d = parse_tokens(&["nginx".to_string()]).unwrap();
        assert!(d.unknown_flags.is_empty());
    }

    #[test]
    fn test_missing_image() {
        let err = parse_run_command("docker run -d -p 80:80").unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field: "image", .. }));
        assert_eq!(
            err.to_string(),
            "Could not find the image name in the docker run command."
        );
    }

    #[test]
    fn test_empty_input() {
        let err = run_to_compose("   ").unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_empty_word_is_not_an_image() {
        let err = parse_run_command(r#"docker run -d """#).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field: "image", .. }));

        let err = parse_run_command(r#"docker run "" echo hi"#).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field: "image", .. }));
    }

    #[test]
    fn test_empty_flag_values_are_dropped() {
        let d = parse(r#"docker run --name "" -w "" -e "" -p "" -v '' --restart= nginx"#);
        assert_eq!(d.name, None);
        assert_eq!(d.working_dir, None);
        assert_eq!(d.environment, None);
        assert!(d.ports.is_empty());
        assert!(d.volumes.is_empty());
        // `--restart=` has no inline value, so it is an unknown flag
        assert_eq!(d.restart, None);

        let result = run_to_compose(r#"docker run --name "" -w "" -e "" nginx"#).unwrap();
        assert_eq!(result.service, "nginx");
        assert_snapshot!(result.document, @r"
        services:
          nginx:
            image: nginx
        ");
    }

    #[test]
    fn test_quoted_values() {
        let d = parse(r#"docker run -e "GREETING=hello world" --name 'my app' alpine sh -c "echo hi""#);
        assert_eq!(d.environment, list(&["GREETING=hello world"]));
        assert_eq!(d.name.as_deref(), Some("my app"));
        assert_eq!(
            d.command,
            Some(Command::Args(vec!["sh".into(), "-c".into(), "echo hi".into()]))
        );
    }

    #[test]
    fn test_document_output() {
        let result = run_to_compose(
            "docker run -d --name Web_1 -p 8080:80 -e FOO=bar -v data:/data --restart always nginx:1.25",
        )
        .unwrap();

        assert_eq!(result.service, "web_1");
        assert!(result.document.starts_with("services:\n  web_1:\n    image: "));

        let service = service_of(&result);
        assert_eq!(service.image.as_deref(), Some("nginx:1.25"));
        assert_eq!(service.container_name.as_deref(), Some("Web_1"));
        assert_eq!(service.ports, vec!["8080:80"]);
        assert_eq!(service.environment, list(&["FOO=bar"]));
        assert_eq!(service.volumes, vec!["data:/data"]);
        assert_eq!(service.restart.as_deref(), Some("always"));
        assert_eq!(service.command, None);
        assert_eq!(
            result.notes,
            vec!["docker run -d maps to docker compose up -d, not a compose key."]
        );
    }

    #[test]
    fn test_document_omits_detach_and_rm() {
        let result = run_to_compose("docker run -d --rm alpine").unwrap();
        assert_eq!(result.document, "services:\n  alpine:\n    image: alpine");
    }

    #[test]
    fn test_env_map_style() {
        let options = RunToComposeOptions {
            environment_style: EnvStyle::Map,
        };
        let result =
            run_to_compose_with_options("docker run -e A=1 -e PASSTHROUGH redis", options).unwrap();

        let doc = document::parse(&result.document).unwrap();
        let env = &doc["services"]["redis"]["environment"];
        assert_eq!(env["A"], serde_yaml::Value::String("1".into()));
        assert!(env["PASSTHROUGH"].is_null());
        assert!(env.is_mapping());
    }

    #[test]
    fn test_derive_service_name() {
        assert_eq!(derive_service_name("nginx"), "nginx");
        assert_eq!(derive_service_name("ghcr.io/acme/My.App:1.2"), "myapp");
        assert_eq!(derive_service_name("localhost:5000/team/api"), "api");
        assert_eq!(derive_service_name("registry/"), "service");
        assert_eq!(derive_service_name(":tag"), "service");
    }

    #[test]
    fn test_sanitize_service_name() {
        assert_eq!(sanitize_service_name("My App!"), "myapp");
        assert_eq!(sanitize_service_name("api-v2_blue"), "api-v2_blue");
        assert_eq!(sanitize_service_name("!!!"), "service");
    }
}
