//! Configuration management for tootstrip.
//!
//! Loads configuration from ${TOOTSTRIP_HOME}/config.toml with sensible
//! defaults; a missing file is not an error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::decode::EventFilter;
use crate::ring::RotatingDisplay;

/// Path helpers for the tootstrip home directory.
pub mod paths {
    //! TOOTSTRIP_HOME resolution order:
    //! 1. TOOTSTRIP_HOME environment variable (if set)
    //! 2. ~/.config/tootstrip

    use std::path::PathBuf;

    /// Returns the tootstrip home directory.
    pub fn tootstrip_home() -> PathBuf {
        if let Ok(home) = std::env::var("TOOTSTRIP_HOME") {
            return PathBuf::from(home);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config").join("tootstrip")
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        tootstrip_home().join("config.toml")
    }
}

/// Widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instance base URL.
    pub base_url: String,
    /// Number of display slots on the strip.
    pub capacity: usize,
    /// Event name that carries new posts.
    pub event: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://imastodon.net".to_string(),
            capacity: RotatingDisplay::DEFAULT_CAPACITY,
            event: EventFilter::UPDATE.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}
