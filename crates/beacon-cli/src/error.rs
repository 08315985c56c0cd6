//! Error types for beacon-cli

use thiserror::Error;

/// Result type alias for beacon-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in beacon-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from beacon-core
    #[error("Core error: {0}")]
    Core(#[from] beacon_core::Error),

    /// Error from beacon-api
    #[error("Server error: {0}")]
    Api(#[from] beacon_api::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The probed server answered with a non-success status
    #[error("Server returned HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body as received
        body: String,
    },
}
