//! `dockform env`: `.env` lines ⇄ Compose `environment` blocks

use std::path::Path;

use dockform_core::env::{compose_to_dotenv, dotenv_to_compose};

use crate::display;
use crate::error::Result;
use crate::util::read_input;

pub fn to_compose(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    display::print_output(&dotenv_to_compose(&text)?);
    Ok(())
}

pub fn from_compose(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    display::print_output(&compose_to_dotenv(&text)?);
    Ok(())
}
