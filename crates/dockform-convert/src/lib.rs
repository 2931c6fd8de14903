//! Dockform Convert - Compose ⇄ `docker run` converter
//!
//! This crate translates between the two textual forms a container is
//! usually described in:
//!
//! | Compose                          | docker run                      |
//! |----------------------------------|---------------------------------|
//! | `container_name: web`            | `--name web`                    |
//! | `ports: ["8080:80"]`             | `-p 8080:80`                    |
//! | `environment: {DEBUG: "1"}`      | `-e DEBUG=1`                    |
//! | `volumes: [{source: a, target: /b, read_only: true}]` | `-v a:/b:ro` |
//! | `working_dir`, `network_mode`    | `--workdir`, `--network`        |
//!
//! # Example
//!
//! ```
//! use dockform_convert::{compose_to_run, run_to_compose};
//!
//! let result = compose_to_run("image: nginx\nports: [\"8080:80\"]").unwrap();
//! assert_eq!(result.commands, "docker run -p 8080:80 nginx");
//!
//! let result = run_to_compose("docker run -d --name web nginx").unwrap();
//! assert!(result.document.starts_with("services:\n  web:\n"));
//! for note in &result.notes {
//!     println!("note: {}", note);
//! }
//! ```
//!
//! # Lossy conversions
//!
//! Neither form is a superset of the other. Whatever cannot be carried over
//! is reported as a note next to the result:
//!
//! - **Compose → run**: `build` (the image becomes an `IMAGE` placeholder),
//!   `depends_on`, `env_file`
//! - **run → Compose**: `-d` and `--rm` (they belong to `docker compose`
//!   invocations, not to the file), `--env-file`, and any flag outside the
//!   supported table

pub mod compose_to_run;
pub mod error;
pub mod flags;
pub mod normalize;
pub mod run_to_compose;
pub mod shell;

// Re-exports
pub use compose_to_run::{
    RunCommands, RunConversion, ServiceCommand, compose_to_run, compose_to_run_commands,
};
pub use error::{ConvertError, Result};
pub use normalize::{DocumentShape, SERVICE_INDICATOR_KEYS, looks_like_service, normalize_services};
pub use run_to_compose::{
    ComposeConversion, RunToComposeOptions, parse_run_command, run_to_compose,
    run_to_compose_with_options,
};
