//! Tower authentication middleware.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with bearer token
//! validation. Rejected requests get a 403 [`ApiError`] body.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use beacon_core::ApiError;
use http::{HeaderMap, HeaderValue, Request};
use tower::{Layer, Service};

use crate::{AuthConfig, AuthError, AuthenticatedClient, TokenValidator};

const BEARER_PREFIX: &str = "Bearer ";
const WWW_AUTHENTICATE_VALUE: &str = r#"Bearer realm="beacon""#;

/// Tower `Layer` that wraps services with token authentication.
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a new auth layer with the given validator and config.
    pub fn new(validator: Arc<V>, config: AuthConfig) -> Self {
        Self { validator, config }
    }
}

impl<V: TokenValidator> Clone for AuthLayer<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that validates tokens before forwarding requests.
///
/// On success inserts [`AuthenticatedClient`] into request extensions.
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V: TokenValidator, S: Clone> Clone for AuthService<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let validator = Arc::clone(&self.validator);
        let config = self.config.clone();

        Box::pin(async move {
            if !config.enabled {
                req.extensions_mut().insert(AuthenticatedClient::anonymous());
                let resp = inner
                    .call(req)
                    .await
                    .unwrap_or_else(|infallible| match infallible {});
                return Ok(resp.into_response());
            }

            let method = req.method().clone();
            let path = req.uri().path().to_string();

            let token = match bearer_from_headers(req.headers()) {
                Ok(t) => t.to_string(),
                Err(auth_err) => {
                    log_rejection(&method, &path, &auth_err);
                    return Ok(forbidden_response(&path, &auth_err));
                }
            };

            match validator.validate(&token, &config).await {
                Ok(client) => {
                    log::debug!(
                        "Authentication successful for request: {method} {path} ({})",
                        client.method
                    );
                    req.extensions_mut().insert(client);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log_rejection(&method, &path, &auth_err);
                    Ok(forbidden_response(&path, &auth_err))
                }
            }
        })
    }
}

/// Return the token following `Bearer ` in an Authorization header value.
///
/// The prefix match is exact: `bearer x` and `Bearer` are rejected, while
/// `Bearer ` yields an empty token.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX)
}

/// Read the bearer token from request headers.
pub fn bearer_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;
    let value = value.to_str().map_err(|_| AuthError::InvalidFormat)?;
    extract_bearer_token(value).ok_or(AuthError::InvalidFormat)
}

/// A presented-but-rejected token is logged at warn; a missing or malformed
/// header only at debug.
fn log_rejection(method: &http::Method, path: &str, err: &AuthError) {
    if err.token_presented() {
        log::warn!("Authentication failed for request: {method} {path}: {err}");
    } else {
        log::debug!("Authentication failed for request: {method} {path}: {err}");
    }
}

/// Build a 403 response with a `WWW-Authenticate` challenge.
fn forbidden_response(path: &str, err: &AuthError) -> axum::response::Response {
    let mut response = ApiError::forbidden(path)
        .with_field_error("authorization", err.to_string())
        .into_response();
    response.headers_mut().insert(
        http::header::WWW_AUTHENTICATE,
        HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
    );
    response
}
