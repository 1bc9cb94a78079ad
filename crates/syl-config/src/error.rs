//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required connection field is missing after all layers are merged.
    #[error("Required configuration field '{field}' is not set")]
    NotConfigured { field: String },

    /// The database URL could not be parsed.
    #[error("Unsupported database URL '{url}': {reason}")]
    UnsupportedUrl { url: String, reason: String },

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
