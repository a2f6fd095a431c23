use anyhow::{Result, anyhow};
use colored::*;
use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::cli::commands::ConfigCommands;
use crate::config::{Config, LOCAL_CONFIG_FILE};

pub fn config_command(command: ConfigCommands, global: &GlobalArgs) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = global.resolve_config()?;
            let text = toml::to_string_pretty(&config)?;
            println!("{}", text);
            Ok(())
        }
        ConfigCommands::Init { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
            if path.exists() && !force {
                return Err(anyhow!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }

            Config::default().save_to(&path)?;
            println!("{} {}", "Wrote default config to".green(), path.display());
            Ok(())
        }
    }
}
