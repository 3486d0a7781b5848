//! Game configuration loaded from TOML.

use super::{BoardSize, InvalidInput};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a game instance.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length N.
    #[serde(default = "default_size")]
    size: usize,
}

#[instrument]
fn default_size() -> usize {
    BoardSize::CLASSIC.get()
}

impl GameConfig {
    /// Creates a configuration for an N×N board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(size = config.size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.board_size()?;
        Ok(config)
    }

    /// Returns a copy with the board size replaced.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Validated board size.
    pub fn board_size(&self) -> Result<BoardSize, ConfigError> {
        BoardSize::new(self.size).map_err(ConfigError::from)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<InvalidInput> for ConfigError {
    #[track_caller]
    fn from(err: InvalidInput) -> Self {
        Self::new(err.message)
    }
}
