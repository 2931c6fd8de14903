//! Dockform CLI - convert between Compose files and `docker run` commands

use clap::{Parser, Subcommand, ValueEnum};
use dockform_core::{EnvStyle, Format};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;
mod util;

#[derive(Parser)]
#[command(name = "dockform")]
#[command(author = "Dockform Contributors")]
#[command(version)]
#[command(about = "Convert between Docker Compose files and docker run commands", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Compose file into docker run commands
    ToRun {
        /// Compose file (reads stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Only convert this service
        #[arg(short, long)]
        service: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a docker run command into a Compose file
    ///
    /// Options must come before the command, e.g.
    /// `dockform to-compose --env-style map docker run -e A=1 nginx`
    ToCompose {
        /// The docker run command (reads FILE or stdin when absent)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// File holding the docker run command
        #[arg(short, long, conflicts_with = "args")]
        file: Option<PathBuf>,

        /// Shape of the emitted `environment` key
        #[arg(long, value_enum, env = "DOCKFORM_ENV_STYLE", default_value = "list")]
        env_style: EnvStyleArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert between .env lines and Compose environment blocks
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Re-emit a YAML or JSON document
    Fmt {
        /// Input document (reads stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Output syntax
        #[arg(long, value_enum, default_value = "yaml")]
        to: FormatArg,
    },
}

#[derive(Subcommand)]
enum EnvCommands {
    /// .env lines → `environment:` mapping
    ToCompose {
        /// .env file (reads stdin when absent or `-`)
        file: Option<PathBuf>,
    },

    /// `environment:` block → .env lines
    FromCompose {
        /// Compose snippet (reads stdin when absent or `-`)
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EnvStyleArg {
    /// `- KEY=VALUE` entries
    List,
    /// `KEY: VALUE` pairs
    Map,
}

impl From<EnvStyleArg> for EnvStyle {
    fn from(arg: EnvStyleArg) -> Self {
        match arg {
            EnvStyleArg::List => EnvStyle::List,
            EnvStyleArg::Map => EnvStyle::Map,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => Format::Yaml,
            FormatArg::Json => Format::Json,
        }
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::ToRun {
            file,
            service,
            json,
        } => commands::to_run::run(file.as_deref(), service.as_deref(), json),

        Commands::ToCompose {
            args,
            file,
            env_style,
            json,
        } => commands::to_compose::run(&args, file.as_deref(), env_style.into(), json),

        Commands::Env { command } => match command {
            EnvCommands::ToCompose { file } => commands::env::to_compose(file.as_deref()),
            EnvCommands::FromCompose { file } => commands::env::from_compose(file.as_deref()),
        },

        Commands::Fmt { file, to } => commands::fmt::run(file.as_deref(), to.into()),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Log to stderr; `--debug` overrides `RUST_LOG`
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
