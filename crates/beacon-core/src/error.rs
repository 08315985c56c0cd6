//! Error types for beacon-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for beacon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in beacon-core and the crates built on it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error tied to a specific file
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Runtime probe failure (memory, processors)
    #[error("Probe error: {message}")]
    Probe {
        /// What could not be measured
        message: String,
    },

    /// A service did not reach the expected lifecycle state
    #[error("Service '{service}' {message}")]
    Lifecycle {
        /// Service name
        service: String,
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new probe error.
    pub fn probe<S: Into<String>>(message: S) -> Self {
        Error::Probe {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
