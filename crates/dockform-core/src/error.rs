//! Core error types

use miette::Diagnostic;
use thiserror::Error;

use crate::document::DocumentError;

#[derive(Error, Debug, Diagnostic)]
pub enum CoreError {
    #[error("Provide {what} to convert.")]
    #[diagnostic(code(dockform::core::empty_input), severity(Warning))]
    EmptyInput { what: String },

    #[error("No {field} data found.")]
    #[diagnostic(
        code(dockform::core::missing_field),
        help("Paste a block with an `environment:` key, or the bare list or mapping")
    )]
    MissingField { field: String },

    #[error(transparent)]
    #[diagnostic(code(dockform::core::document))]
    Document(#[from] DocumentError),
}

impl CoreError {
    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
