//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod config;
pub mod detect;
pub mod highlight;
pub mod languages;
pub mod render;

use crate::cli::Cli;
use crate::error::Result;
use crate::highlight::Highlighter;

/// Build the highlighter for a command from the effective configuration.
pub fn get_highlighter(cli: &Cli) -> Result<Highlighter> {
    let config = cli.load_config()?;
    Ok(Highlighter::from_config(&config.highlight))
}
