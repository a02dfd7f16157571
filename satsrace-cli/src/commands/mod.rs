pub mod config;
pub mod play;

pub use config::{handle_config_command, ConfigCommands};
pub use play::play;
