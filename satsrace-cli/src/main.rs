mod commands;
mod config;
mod input;
mod render;

use clap::{Parser, Subcommand};
use config::CliConfig;
use satsrace_core::{ErrorKind, RaceError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "satsrace")]
#[command(about = "Tap as fast as you can. Fastest racer takes the sats.")]
#[command(version)]
struct Cli {
    /// Path to the race config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register players and race (default)
    Play {
        /// Print the final standings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "satsrace={},satsrace_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli_config = CliConfig::resolve(cli.config);

    let result = match cli.command.unwrap_or(Commands::Play { json: false }) {
        Commands::Play { json } => commands::play(&cli_config, json).await,
        Commands::Config(cmd) => commands::handle_config_command(cmd, &cli_config),
    };

    if let Err(e) = result {
        match e.downcast_ref::<RaceError>() {
            Some(RaceError::Config(msg)) => {
                eprintln!("Error: Invalid configuration: {}", msg);
                eprintln!("Config file: {}", cli_config.config_path.display());
                eprintln!("Use 'satsrace config init --force' to restore the defaults");
            }
            Some(err) if err.kind() != ErrorKind::Other => {
                eprintln!("Error: {}", err);
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
