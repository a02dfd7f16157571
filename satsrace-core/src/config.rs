use crate::error::{RaceError, Result};
use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fewest players a race may start with.
pub const MIN_PLAYERS: usize = 2;

pub const DEFAULT_REWARD_SATS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub reward_sats: u64,
    pub min_players: usize,
    pub countdown_secs: u64,
    /// Smallest progress gain per tap, in percent
    pub tap_step_min: f64,
    /// Largest progress gain per tap, in percent (exclusive)
    pub tap_step_max: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            reward_sats: DEFAULT_REWARD_SATS,
            min_players: MIN_PLAYERS,
            countdown_secs: 3,
            tap_step_min: 1.5,
            tap_step_max: 2.5,
        }
    }
}

impl RaceConfig {
    pub fn reward(&self) -> Amount {
        Amount::from_sat(self.reward_sats)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_players < MIN_PLAYERS {
            return Err(RaceError::config(format!(
                "min_players must be at least {}",
                MIN_PLAYERS
            )));
        }

        if self.tap_step_min.is_nan() || self.tap_step_min <= 0.0 || !self.tap_step_max.is_finite()
        {
            return Err(RaceError::config("tap steps must be positive numbers"));
        }

        if self.tap_step_min >= self.tap_step_max {
            return Err(RaceError::config(
                "tap_step_min must be smaller than tap_step_max",
            ));
        }

        if self.tap_step_max > 100.0 {
            return Err(RaceError::config("tap_step_max cannot exceed 100"));
        }

        Ok(())
    }

    /// Load a JSON config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded race config from {}", path.display());
        Ok(config)
    }

    /// Like [`RaceConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
