//! Error types for bursar

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bursar
#[derive(Debug, Error)]
pub enum BursarError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Student ID already exists: {0}")]
    Duplicate(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Failed to access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {}: invalid amount '{value}' on line {line}", .path.display())]
    Load {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BursarError {
    /// Wrap an IO error with the path it happened on
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BursarError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BursarError::Validation(_) => 3,
            BursarError::Duplicate(_) => 4,
            BursarError::NotFound(_) => 5,
            BursarError::Persistence { .. } => 6,
            BursarError::Load { .. } => 7,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BursarError::Duplicate(id) => {
                format!(
                    "Student ID already exists: '{}'\n\n\
                    Suggestions:\n\
                    • IDs are case-insensitive ('s1' and 'S1' are the same student)\n\
                    • Use 'bursar list' to see registered students\n\
                    • Record a payment instead: bursar pay {} <AMOUNT>",
                    id, id
                )
            }
            BursarError::NotFound(id) => {
                format!(
                    "Student not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'bursar list' to see registered students\n\
                    • Register the student first: bursar register {} <NAME> <AMOUNT>",
                    id, id
                )
            }
            BursarError::Load { path, line, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Fix or remove line {} of {}\n\
                    • Each line must look like: <id>,<name>,<amount>\n\
                    • Nothing was written; the file is left as it is",
                    self,
                    line,
                    path.display()
                )
            }
            BursarError::Validation(msg) if msg.contains("amount") => {
                format!(
                    "{}\n\n\
                    Amounts are plain decimal numbers (e.g., 100, 25.50)",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BursarError
pub type Result<T> = std::result::Result<T, BursarError>;
