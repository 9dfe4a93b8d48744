//! Config management use case

use crate::error::{BursarError, Result};
use crate::infrastructure::Config;
use std::path::PathBuf;

const VALID_KEYS: &str = "data_file, receipt_dir";

/// Service for reading and editing bursar.toml
pub struct ConfigService {
    root: PathBuf,
}

impl ConfigService {
    /// Create a config service for the directory holding bursar.toml
    pub fn new(root: PathBuf) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load_from_dir(&self.root)?;

        match key {
            "data_file" => Ok(config.data_file.display().to_string()),
            "receipt_dir" => Ok(config.receipt_dir.display().to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value and write bursar.toml
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_from_dir(&self.root)?;

        if value.trim().is_empty() {
            return Err(BursarError::Config(format!("Value for '{}' must not be empty", key)));
        }

        match key {
            "data_file" => config.data_file = PathBuf::from(value),
            "receipt_dir" => config.receipt_dir = PathBuf::from(value),
            _ => return Err(unknown_key(key)),
        }

        config.save_to_dir(&self.root)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }
}

fn unknown_key(key: &str) -> BursarError {
    BursarError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
