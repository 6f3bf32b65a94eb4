//! Unified error types for bundle-sbom.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SBOM generation operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomGenError {
    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// SBOM document serialization errors
    #[error("SBOM serialization failed: {0}")]
    Serialize(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenient Result type for bundle-sbom operations
pub type Result<T> = std::result::Result<T, SbomGenError>;

impl SbomGenError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for SbomGenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SbomGenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SbomGenError::io("/dist/npm-sbom.json", io_err);
        assert!(err.to_string().contains("npm-sbom.json"));
    }

    #[test]
    fn config_error_display() {
        let err = SbomGenError::config("manifest filename is empty");
        assert!(err.to_string().contains("manifest filename"));
    }
}
