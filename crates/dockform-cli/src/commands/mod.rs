//! CLI command implementations

pub mod env;
pub mod fmt;
pub mod to_compose;
pub mod to_run;
