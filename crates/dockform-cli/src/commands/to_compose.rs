//! `dockform to-compose`: `docker run` → Compose

use std::path::Path;

use dockform_convert::{RunToComposeOptions, run_to_compose_with_options};
use dockform_core::EnvStyle;

use crate::display;
use crate::error::Result;
use crate::util::{join_args, read_input};

/// Trailing arguments win over `file`
pub fn run(args: &[String], file: Option<&Path>, env_style: EnvStyle, json: bool) -> Result<()> {
    let text = if args.is_empty() {
        read_input(file)?
    } else {
        join_args(args)
    };

    let options = RunToComposeOptions {
        environment_style: env_style,
    };
    let result = run_to_compose_with_options(&text, options)?;

    if json {
        return display::print_json(&result);
    }

    display::print_output(&result.document);
    display::print_summary(&display::services_message(&[result.service.as_str()]), &result.notes);
    Ok(())
}
