//! Terminal output for conversion results
//!
//! Converted text goes to stdout untouched so it can be piped. Status lines
//! and loss notes go to stderr.

use console::style;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Print the converted text on stdout
pub fn print_output(text: &str) {
    println!("{}", text.trim_end());
}

/// Print a result as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::internal(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Print a success line and the loss notes on stderr
pub fn print_summary(message: &str, notes: &[String]) {
    eprintln!("{} {}", style("✓").green().for_stderr(), message);

    if notes.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("{}", style("Notes:").yellow().bold().for_stderr());
    for note in notes {
        eprintln!("  {} {}", style("⚠").yellow().for_stderr(), note);
    }
}

/// Success message naming the services that were converted
pub fn services_message(names: &[&str]) -> String {
    match names {
        [one] => format!("Converted service {}", style(one).cyan().for_stderr()),
        _ => format!(
            "Converted {} services: {}",
            names.len(),
            style(names.join(", ")).cyan().for_stderr()
        ),
    }
}
