use crate::config::CliConfig;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use satsrace_core::RaceConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the settings a race would use
    Show,
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_config_command(cmd: ConfigCommands, cli_config: &CliConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let race_config = cli_config.race_config()?;

            if cli_config.config_exists() {
                println!("Config file: {}", cli_config.config_path.display());
            } else {
                println!(
                    "No config file at {}, using defaults",
                    cli_config.config_path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&race_config)?);
        }

        ConfigCommands::Init { force } => {
            let path = &cli_config.config_path;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            RaceConfig::default()
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            tracing::info!("Wrote default config to {}", path.display());
            println!("Created {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_defaults_once() {
        let temp_dir = tempdir().unwrap();
        let cli_config = CliConfig::resolve(Some(temp_dir.path().join("config.json")));

        handle_config_command(ConfigCommands::Init { force: false }, &cli_config).unwrap();
        assert_eq!(cli_config.race_config().unwrap(), RaceConfig::default());

        assert!(handle_config_command(ConfigCommands::Init { force: false }, &cli_config).is_err());
        assert!(handle_config_command(ConfigCommands::Init { force: true }, &cli_config).is_ok());
        assert!(handle_config_command(ConfigCommands::Show, &cli_config).is_ok());
    }
}
