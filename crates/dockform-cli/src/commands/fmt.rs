//! `dockform fmt`: re-emit YAML or JSON

use std::path::Path;

use dockform_core::{Format, document};

use crate::display;
use crate::error::Result;
use crate::util::read_input;

pub fn run(file: Option<&Path>, to: Format) -> Result<()> {
    let text = read_input(file)?;
    display::print_output(&document::reformat(&text, to)?);
    Ok(())
}
