//! Configured-token validation.

use crate::{AuthConfig, AuthError, AuthMethod, AuthenticatedClient, TokenValidator, ValidationFuture};

/// Check a token against the configured secret key and allowed tokens.
///
/// A blank token is always rejected. The secret key is consulted only when
/// it is non-blank. Allowed-token entries are trimmed before comparison; the
/// token itself is compared as given.
pub fn validate_static(token: &str, config: &AuthConfig) -> Result<AuthMethod, AuthError> {
    if token.trim().is_empty() {
        log::debug!("Token validation failed: token is blank");
        return Err(AuthError::BlankToken);
    }

    if !config.secret_key.trim().is_empty() && token == config.secret_key {
        log::debug!("Token validated using secret key");
        return Ok(AuthMethod::SecretKey);
    }

    if config
        .allowed_tokens
        .iter()
        .any(|allowed| token == allowed.trim())
    {
        log::debug!("Token validated using allowed tokens list");
        return Ok(AuthMethod::AllowedToken);
    }

    log::debug!("Token validation failed: not the secret key or an allowed token");
    Err(AuthError::UnknownToken)
}

/// [`TokenValidator`] backed by [`validate_static`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTokenValidator;

impl TokenValidator for StaticTokenValidator {
    fn validate<'a>(&'a self, token: &'a str, config: &'a AuthConfig) -> ValidationFuture<'a> {
        let result = validate_static(token, config).map(AuthenticatedClient::api_client);
        Box::pin(std::future::ready(result))
    }
}
