/// Structured error types for linkdeck-core.
///
/// The binary crate (linkdeck-cli) wraps these in `anyhow` for reporting,
/// library consumers get the variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linkdeck-core operations
#[derive(Error, Debug)]
pub enum LinkdeckError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for the expected shape
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Environment variable present but unusable
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidEnv {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for linkdeck-core operations
pub type Result<T> = std::result::Result<T, LinkdeckError>;

impl LinkdeckError {
    /// Create an invalid environment value error
    pub fn invalid_env(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEnv {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
