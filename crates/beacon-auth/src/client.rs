//! Authenticated client identity and extraction helpers.

use std::fmt;

use axum::extract::FromRequestParts;
use beacon_core::ApiError;
use http::request::Parts;

/// Principal assigned to every token-authenticated request.
pub const API_CLIENT: &str = "api-client";

/// Principal assigned when authentication is disabled.
pub const ANONYMOUS: &str = "anonymous";

/// How a client was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Token equals the configured secret key.
    SecretKey,
    /// Token is one of the configured allowed tokens.
    AllowedToken,
    /// Authentication is switched off.
    Disabled,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::SecretKey => write!(f, "secret-key"),
            AuthMethod::AllowedToken => write!(f, "allowed-token"),
            AuthMethod::Disabled => write!(f, "disabled"),
        }
    }
}

/// Identity stored in request extensions by the auth middleware.
///
/// Also usable directly as a handler argument; extraction fails with 403
/// when the middleware did not run or rejected the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedClient {
    /// Principal name.
    pub principal: String,
    /// Which rule accepted the request.
    pub method: AuthMethod,
}

impl AuthenticatedClient {
    /// A client accepted by token.
    pub fn api_client(method: AuthMethod) -> Self {
        Self {
            principal: API_CLIENT.to_string(),
            method,
        }
    }

    /// The client used when authentication is disabled.
    pub fn anonymous() -> Self {
        Self {
            principal: ANONYMOUS.to_string(),
            method: AuthMethod::Disabled,
        }
    }
}

/// Extract the `AuthenticatedClient` from HTTP request `Parts`, if present.
pub fn client_from_parts(parts: &Parts) -> Option<&AuthenticatedClient> {
    parts.extensions.get::<AuthenticatedClient>()
}

impl<S> FromRequestParts<S> for AuthenticatedClient
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        client_from_parts(parts)
            .cloned()
            .ok_or_else(|| ApiError::forbidden(parts.uri.path()))
    }
}
