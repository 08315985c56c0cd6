//! Error types for beacon-api

use thiserror::Error;

/// Result type alias for beacon-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in beacon-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from beacon-core
    #[error("Core error: {0}")]
    Core(#[from] beacon_core::Error),

    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
