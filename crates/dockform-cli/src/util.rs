//! Shared helpers for CLI commands

use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::error::{CliError, Result};

/// Read the command input from a file, or from stdin for `None` and `-`
///
/// An interactive stdin is not waited on: with nothing piped in there is
/// nothing to convert.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "reading input file");
            std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))
        }
        _ => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(CliError::no_input("No input given."));
            }
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            tracing::debug!(bytes = text.len(), "read input from stdin");
            Ok(text)
        }
    }
}

/// Rebuild one command line from arguments the shell already split
///
/// Arguments are re-quoted so that values with spaces survive tokenizing.
#[must_use]
pub fn join_args(args: &[String]) -> String {
    dockform_convert::shell::join_escaped(args)
}
