//! Inspect the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use linkdeck_core::LinkdeckConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration (file + environment) as TOML, secrets masked
    Show,
    /// Print the config file location
    Path,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = LinkdeckConfig::load().context("Failed to load configuration")?;
            print!("{}", config.redacted().to_toml()?);
        }
        ConfigCommands::Path => {
            let path = LinkdeckConfig::config_path();
            let state = if path.exists() { "" } else { " (not found, using defaults)" };
            println!("{}{}", path.display(), state);
        }
    }
    Ok(())
}
