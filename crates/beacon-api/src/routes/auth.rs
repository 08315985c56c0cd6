//! Public token check endpoints.
//!
//! Both endpoints read the `Authorization` header themselves instead of
//! going through [`beacon_auth::AuthLayer`], so a caller without a token
//! still gets an answer.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use beacon_auth::{extract_bearer_token, AuthError, TokenValidator};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of both auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidationResponse {
    /// Whether the presented token was accepted.
    pub valid: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl TokenValidationResponse {
    fn new(valid: bool, message: &str) -> Self {
        Self {
            valid,
            message: message.to_string(),
        }
    }
}

/// Non-blank `Authorization` header value.
///
/// An absent or blank header is `MissingToken`; bytes that are not visible
/// ASCII are `InvalidFormat`.
fn authorization(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;
    if value.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(value)
}

async fn token_is_valid(state: &AppState, header_value: &str) -> bool {
    match extract_bearer_token(header_value) {
        Some(token) => state.validator.validate(token, &state.auth).await.is_ok(),
        None => false,
    }
}

/// `GET /api/auth/check`
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<TokenValidationResponse> {
    let value = match authorization(&headers) {
        Ok(value) => value,
        Err(AuthError::MissingToken) => {
            return Json(TokenValidationResponse::new(
                false,
                "No authentication token provided",
            ));
        }
        Err(_) => {
            return Json(TokenValidationResponse::new(
                false,
                "Authentication header is invalid or token is expired",
            ));
        }
    };

    if token_is_valid(&state, value).await {
        Json(TokenValidationResponse::new(true, "Authentication token is valid"))
    } else {
        Json(TokenValidationResponse::new(
            false,
            "Authentication header is invalid or token is expired",
        ))
    }
}

/// `POST /api/auth/validate`
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<TokenValidationResponse>) {
    let value = match authorization(&headers) {
        Ok(value) => Some(value),
        Err(AuthError::MissingToken) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(TokenValidationResponse::new(false, "Authorization header is missing")),
            );
        }
        Err(_) => None,
    };

    let Some(value) = value.filter(|v| extract_bearer_token(v).is_some()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(TokenValidationResponse::new(
                false,
                "Invalid Authorization header format. Use: Bearer <token>",
            )),
        );
    };

    if token_is_valid(&state, value).await {
        tracing::debug!("Token validation succeeded");
        (StatusCode::OK, Json(TokenValidationResponse::new(true, "Token is valid")))
    } else {
        tracing::debug!("Token validation rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(TokenValidationResponse::new(false, "Token is invalid or expired")),
        )
    }
}
