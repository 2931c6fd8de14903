//! CLI error type with exit code handling
//!
//! Library errors are folded into [`CliError`] so that `main` can pick an
//! exit code and render a single diagnostic.

use std::path::Path;

use dockform_convert::ConvertError;
use dockform_core::{CoreError, DocumentError};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The input was read but could not be converted
    #[error("{message}")]
    #[diagnostic(code(dockform::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Nothing to convert
    #[error("{message}")]
    #[diagnostic(
        code(dockform::cli::no_input),
        severity(Warning),
        help("Pass a file, pipe the text on stdin, or use `-` for stdin")
    )]
    NoInput { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(dockform::cli::io))]
    Io { message: String },

    /// Internal error (unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(dockform::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::NoInput { .. } => exit_codes::NO_INPUT,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn no_input(message: impl Into<String>) -> Self {
        Self::NoInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an IO error naming the file involved
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::EmptyInput { .. } => CliError::no_input(err.to_string()),
            ConvertError::Document(inner) => CliError::internal(inner.to_string()),
            other => CliError::Input {
                message: other.to_string(),
                help: other.help().map(|help| help.to_string()),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyInput { .. } => CliError::no_input(err.to_string()),
            CoreError::Document(inner @ DocumentError::Parse(_)) => CliError::Input {
                message: inner.to_string(),
                help: None,
            },
            CoreError::Document(inner) => CliError::internal(inner.to_string()),
            other => CliError::Input {
                message: other.to_string(),
                help: other.help().map(|help| help.to_string()),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
