//! Configuration management

use crate::error::{BursarError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "bursar.toml";

pub const DATA_FILE_ENV: &str = "BURSAR_DATA_FILE";
pub const RECEIPT_DIR_ENV: &str = "BURSAR_RECEIPT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Student data file, relative to the config directory unless absolute
    pub data_file: PathBuf,
    /// Directory receipts are written into
    pub receipt_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from("students.txt"),
            receipt_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load config from bursar.toml in the given directory.
    /// A missing file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(BursarError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| BursarError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Save config to bursar.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Load from `dir`, then apply environment overrides
    pub fn resolve(dir: &Path) -> Result<Self> {
        let config = Self::load_from_dir(dir)?;
        Ok(config.with_overrides(
            std::env::var_os(DATA_FILE_ENV).map(PathBuf::from),
            std::env::var_os(RECEIPT_DIR_ENV).map(PathBuf::from),
        ))
    }

    /// Replace fields that have an override value
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, receipt_dir: Option<PathBuf>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if let Some(receipt_dir) = receipt_dir {
            self.receipt_dir = receipt_dir;
        }
        self
    }

    /// Data file resolved against `base`
    pub fn data_path(&self, base: &Path) -> PathBuf {
        base.join(&self.data_file)
    }

    /// Receipt directory resolved against `base`
    pub fn receipt_path(&self, base: &Path) -> PathBuf {
        base.join(&self.receipt_dir)
    }
}
