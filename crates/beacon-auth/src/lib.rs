//! Static bearer token authentication for Beacon.
//!
//! Provides:
//! - [`AuthenticatedClient`]: Identity attached to a request after validation
//! - [`TokenValidator`]: Trait for async token validation
//! - [`StaticTokenValidator`]: Accepts the configured secret key or an allowed token
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `TokenValidator`
//! - [`AuthConfig`]: Configuration for the auth layer
//! - [`AuthError`]: Why a request was not authenticated

mod client;
mod error;
mod middleware;
mod validator;

use std::future::Future;
use std::pin::Pin;

use beacon_core::config::AuthSection;

pub use client::{client_from_parts, AuthMethod, AuthenticatedClient};
pub use error::AuthError;
pub use middleware::{bearer_from_headers, extract_bearer_token, AuthLayer, AuthService};
pub use validator::{validate_static, StaticTokenValidator};

/// Boxed future returned by [`TokenValidator::validate`].
pub type ValidationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AuthenticatedClient, AuthError>> + Send + 'a>>;

/// Configuration for the auth middleware and validators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthConfig {
    /// Whether authentication is enabled. When false, all requests pass
    /// through as an anonymous client.
    pub enabled: bool,
    /// Primary accepted token. Empty means no secret key is configured.
    pub secret_key: String,
    /// Additional accepted tokens. Entries are trimmed before comparison.
    pub allowed_tokens: Vec<String>,
}

impl From<&AuthSection> for AuthConfig {
    fn from(section: &AuthSection) -> Self {
        Self {
            enabled: section.enabled,
            secret_key: section.secret_key.clone(),
            allowed_tokens: section.allowed_tokens.clone(),
        }
    }
}

/// Validates a bearer token and identifies the caller.
///
/// The middleware calls `validate()` with the token that followed `Bearer `
/// and attaches the returned client to the request.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated client.
    fn validate<'a>(&'a self, token: &'a str, config: &'a AuthConfig) -> ValidationFuture<'a>;
}
