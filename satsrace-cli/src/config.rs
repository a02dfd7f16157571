use satsrace_core::RaceConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub config_path: PathBuf,
}

impl CliConfig {
    pub fn resolve(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(default_config_path),
        }
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Race settings from the config file, or the defaults when there is none
    pub fn race_config(&self) -> satsrace_core::Result<RaceConfig> {
        RaceConfig::load_or_default(Some(self.config_path.as_path()))
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("satsrace")
        .join("config.json")
}
