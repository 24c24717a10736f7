//! Config command implementation.
//!
//! View and initialize claude-history configuration.

use std::path::PathBuf;

use crate::cli::{Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::{Result, ViewerError};

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_config_path(cli),
        ConfigAction::Init => init_config(cli),
    }
}

/// Show the effective configuration.
fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config).map_err(|e| ViewerError::InvalidConfig {
                message: format!("Failed to serialize config: {e}"),
            })?;
            print!("{toml}");
        }
    }

    Ok(())
}

/// Print the configuration file path.
fn show_config_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;
    println!("{}", path.display());
    Ok(())
}

/// Initialize configuration file with defaults.
fn init_config(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;

    if path.exists() {
        if !cli.quiet {
            println!("Configuration file already exists at: {}", path.display());
        }
        return Ok(());
    }

    Config::default().save_to(&path)?;
    if !cli.quiet {
        println!("Created configuration file at: {}", path.display());
    }

    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}
