//! Auth-specific error types.

/// Reasons a request is not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header present.
    #[error("missing authentication token")]
    MissingToken,

    /// Authorization header present but not of the form `Bearer <token>`.
    #[error("authorization header is not a bearer token")]
    InvalidFormat,

    /// `Bearer ` followed by nothing but whitespace.
    #[error("bearer token is blank")]
    BlankToken,

    /// Token matches neither the secret key nor any allowed token.
    #[error("token is not recognised")]
    UnknownToken,
}

impl AuthError {
    /// Whether a token was presented at all.
    pub fn token_presented(&self) -> bool {
        matches!(self, AuthError::BlankToken | AuthError::UnknownToken)
    }
}
