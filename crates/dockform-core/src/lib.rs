//! Dockform Core - Core types for converting between container workflow formats
//!
//! This crate provides the foundational types used throughout Dockform:
//! - `ServiceDescriptor`: The pivot record for one service, whichever format it came from
//! - `ComposeFile` / `ComposeService`: The emitted Compose document shape
//! - `document`: The YAML/JSON codec seam (parse, serialize, reformat)
//! - `env`: `.env` list ↔ Compose `environment` helpers

pub mod document;
pub mod env;
pub mod error;
pub mod service;

pub use document::{DocumentError, Format};
pub use error::{CoreError, Result};
pub use service::{
    Command, ComposeFile, ComposeService, EnvStyle, KeyValues, ServiceDescriptor,
};
