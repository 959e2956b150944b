//! Session configuration
//!
//! Loaded from a JSON file in the platform config directory:
//! - Reveal timing (profile, spin duration, tick interval)
//! - Placeholder label for unnamed draws
//! - Optional RNG seed for reproducible sessions
//! - Observer channel capacity

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use raffle_state::DEFAULT_LOTTERY_NAME;

use crate::timing::RevealTiming;

/// Default capacity of the reveal event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid timing: {0}")]
    InvalidTiming(String),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaffleConfig {
    /// Reveal animation timing
    pub timing: RevealTiming,
    /// Label recorded for draws submitted without a name
    pub default_lottery_name: String,
    /// Fixed RNG seed (None = seeded from the OS)
    pub seed: Option<u64>,
    /// Buffered reveal events per subscriber
    pub event_capacity: usize,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            timing: RevealTiming::default(),
            default_lottery_name: DEFAULT_LOTTERY_NAME.to_string(),
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl RaffleConfig {
    /// Load from the standard location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("[Config] {} unusable ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the standard location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save to specified path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        let base = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .map(|h| h.join("Library/Application Support/Raffle"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .map(|d| d.join("Raffle"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            dirs::config_dir()
                .map(|d| d.join("raffle"))
                .unwrap_or_else(|| PathBuf::from("."))
        };
        base.join("config.json")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()
    }

    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
