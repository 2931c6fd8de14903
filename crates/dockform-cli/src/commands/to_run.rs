//! `dockform to-run`: Compose → `docker run`

use std::path::Path;

use dockform_convert::compose_to_run_commands;

use crate::display;
use crate::error::{CliError, Result};
use crate::util::read_input;

pub fn run(file: Option<&Path>, service: Option<&str>, json: bool) -> Result<()> {
    let text = read_input(file)?;
    let mut result = compose_to_run_commands(&text)?;

    if let Some(wanted) = service {
        let available: Vec<String> = result.services.iter().map(|s| s.name.clone()).collect();
        result.services.retain(|s| s.name == wanted);
        if result.services.is_empty() {
            return Err(CliError::input_with_help(
                format!("Service '{wanted}' not found"),
                format!("Available services: {}", available.join(", ")),
            ));
        }
    }

    let names: Vec<&str> = result.services.iter().map(|s| s.name.as_str()).collect();
    let message = display::services_message(&names);
    let conversion = result.into_conversion();

    if json {
        return display::print_json(&conversion);
    }

    display::print_output(&conversion.commands);
    display::print_summary(&message, &conversion.notes);
    Ok(())
}
