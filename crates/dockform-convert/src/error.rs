//! Error types for the converters
//!
//! Every failure is local to one conversion call and carries a single
//! human-readable message. Loss notes are not errors: they travel with a
//! successful result.

use dockform_core::DocumentError;
use miette::Diagnostic;
use thiserror::Error;

/// Converter error
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    /// The input document is not valid YAML
    #[error("Compose parse error: {message}")]
    #[diagnostic(code(dockform::convert::syntax))]
    Syntax { message: String },

    /// The input parsed, but has no service-shaped content
    #[error("{message}")]
    #[diagnostic(
        code(dockform::convert::schema),
        help("A `services:` block, a single service body, or a mapping of service bodies is accepted")
    )]
    Schema { message: String },

    /// Nothing to convert
    #[error("Paste a {what} first.")]
    #[diagnostic(code(dockform::convert::empty_input), severity(Warning))]
    EmptyInput { what: String },

    /// A required field is absent
    #[error("{message}")]
    #[diagnostic(code(dockform::convert::missing_field))]
    MissingField {
        field: &'static str,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The result could not be serialized
    #[error(transparent)]
    #[diagnostic(code(dockform::convert::document))]
    Document(#[from] DocumentError),
}

impl ConvertError {
    pub fn no_services() -> Self {
        Self::Schema {
            message: "No services found. Paste a compose file or a services block.".to_string(),
        }
    }

    pub fn missing_image() -> Self {
        Self::MissingField {
            field: "image",
            message: "Could not find the image name in the docker run command.".to_string(),
            help: Some("The first argument that is not a flag is read as the image".to_string()),
        }
    }

    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    /// Whether this error only means "nothing to do"
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }

    /// Map a codec failure on the input side to a syntax error
    pub(crate) fn syntax(err: &DocumentError) -> Self {
        Self::Syntax {
            message: err.parser_message(),
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
