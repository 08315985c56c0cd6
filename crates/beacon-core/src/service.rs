//! Service lifecycle state management.
//!
//! [`ServiceHandle`] tracks where the HTTP server is in its lifecycle and
//! backs the public health endpoint.
//!
//! ```rust
//! use beacon_core::service::{ServiceHandle, ServiceState};
//!
//! let handle = ServiceHandle::new("http");
//! assert_eq!(handle.state(), ServiceState::Stopped);
//!
//! handle.set_state(ServiceState::Starting);
//! handle.set_state(ServiceState::Ready);
//! assert_eq!(handle.state().health_label(), "UP");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::{Error, Result};

// ============================================================================
// ServiceState
// ============================================================================

/// State of a service in its lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceState {
    /// Not started, or fully shut down.
    Stopped,
    /// Binding the listener.
    Starting,
    /// Accepting requests.
    Ready,
    /// Accepting requests with reduced capability.
    Degraded(String),
    /// Draining connections after a shutdown signal.
    Stopping,
    /// Could not start or crashed.
    Failed(String),
}

impl ServiceState {
    /// Returns `true` if the service is fully ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if the service can handle requests (Ready or Degraded).
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready | Self::Degraded(_))
    }

    /// Returns `true` if the service is in a terminal state (Stopped or Failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Failed(_))
    }

    /// Health label in the actuator vocabulary: `UP`, `OUT_OF_SERVICE` or `DOWN`.
    pub fn health_label(&self) -> &'static str {
        match self {
            Self::Ready | Self::Degraded(_) => "UP",
            Self::Stopping => "OUT_OF_SERVICE",
            Self::Stopped | Self::Starting | Self::Failed(_) => "DOWN",
        }
    }

    /// Reason attached to a Degraded or Failed state.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Degraded(reason) | Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Starting => write!(f, "starting"),
            Self::Ready => write!(f, "ready"),
            Self::Degraded(reason) => write!(f, "degraded: {reason}"),
            Self::Stopping => write!(f, "stopping"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ============================================================================
// ServiceHandle
// ============================================================================

/// Shared handle for observing and updating a service's state.
///
/// Clones share the same state; changes are broadcast on a watch channel.
#[derive(Clone)]
pub struct ServiceHandle {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    tx: watch::Sender<ServiceState>,
    created: Instant,
}

impl ServiceHandle {
    /// Create a handle in the [`ServiceState::Stopped`] state.
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(ServiceState::Stopped);
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                tx,
                created: Instant::now(),
            }),
        }
    }

    /// Service name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current state.
    pub fn state(&self) -> ServiceState {
        self.inner.tx.borrow().clone()
    }

    /// Move to a new state and notify subscribers.
    pub fn set_state(&self, state: ServiceState) {
        log::info!("Service '{}' -> {state}", self.inner.name);
        self.inner.tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ServiceState> {
        self.inner.tx.subscribe()
    }

    /// Wait until the service is Ready. Fails on Failed or after `timeout`.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let mut rx = self.subscribe();
        let outcome = tokio::time::timeout(timeout, async {
            loop {
                let state = rx.borrow_and_update().clone();
                match state {
                    ServiceState::Ready => return Ok(()),
                    ServiceState::Failed(reason) => {
                        return Err(self.lifecycle_error(format!("failed: {reason}")));
                    }
                    _ => {}
                }
                if rx.changed().await.is_err() {
                    return Err(self.lifecycle_error("channel closed"));
                }
            }
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(_) => Err(self.lifecycle_error(format!(
                "not ready after {timeout:?} (state: {})",
                self.state()
            ))),
        }
    }

    /// Time since the handle was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.created.elapsed()
    }

    fn lifecycle_error(&self, message: impl Into<String>) -> Error {
        Error::Lifecycle {
            service: self.inner.name.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
