//! API server implementation

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use beacon_core::{BeaconConfig, ServiceHandle, ServiceState};
use tokio::net::TcpListener;

use crate::routes::router;
use crate::state::AppState;
use crate::status::{ProcMeminfo, ServerStatusService, StatusSource};
use crate::{Error, Result};

/// Beacon API server.
pub struct Server {
    config: BeaconConfig,
    status: Arc<dyn StatusSource>,
    health: ServiceHandle,
}

impl Server {
    /// Create a server reporting on this process via `/proc/meminfo`.
    pub fn new(config: BeaconConfig) -> Self {
        let status = ServerStatusService::new(
            config.app.version.clone(),
            Arc::new(ProcMeminfo::default()),
        );
        Self::with_status_source(config, Arc::new(status))
    }

    /// Create a server backed by a custom status source.
    pub fn with_status_source(config: BeaconConfig, status: Arc<dyn StatusSource>) -> Self {
        Self {
            config,
            status,
            health: ServiceHandle::new("http"),
        }
    }

    /// Lifecycle handle read by `/actuator/health`.
    pub fn health(&self) -> ServiceHandle {
        self.health.clone()
    }

    /// Bind the configured address without serving yet.
    pub async fn bind(self) -> Result<BoundServer> {
        let addr = self.config.bind_address();
        self.health.set_state(ServiceState::Starting);

        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(source) => {
                self.health.set_state(ServiceState::Failed(source.to_string()));
                return Err(Error::Bind { addr, source });
            }
        };
        let local_addr = listener
            .local_addr()
            .map_err(|source| Error::Bind { addr, source })?;

        let state = AppState::new(&self.config, self.status, self.health.clone());
        tracing::info!(
            address = %local_addr,
            auth_enabled = self.config.auth.enabled,
            "Beacon API listening"
        );

        Ok(BoundServer {
            listener,
            router: router(state),
            health: self.health,
            local_addr,
        })
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.bind().await?.serve(shutdown_signal()).await
    }
}

/// A server whose listener is bound.
pub struct BoundServer {
    listener: TcpListener,
    router: Router,
    health: ServiceHandle,
    local_addr: SocketAddr,
}

impl BoundServer {
    /// Address actually bound. Differs from the configured one for port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Lifecycle handle read by `/actuator/health`.
    pub fn health(&self) -> ServiceHandle {
        self.health.clone()
    }

    /// Serve until `shutdown` resolves, then drain connections.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let health = self.health.clone();
        let on_shutdown = {
            let health = health.clone();
            async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, draining connections");
                health.set_state(ServiceState::Stopping);
            }
        };

        health.set_state(ServiceState::Ready);
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(on_shutdown)
            .await;

        match result {
            Ok(()) => {
                health.set_state(ServiceState::Stopped);
                tracing::info!("Beacon API stopped");
                Ok(())
            }
            Err(err) => {
                health.set_state(ServiceState::Failed(err.to_string()));
                Err(Error::Serve(err))
            }
        }
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn local_config() -> BeaconConfig {
        let mut config = BeaconConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config
    }

    #[tokio::test]
    async fn test_bind_reports_ephemeral_port() {
        let bound = Server::new(local_config()).bind().await.unwrap();
        assert_ne!(bound.local_addr().port(), 0);
        assert_eq!(bound.health().state(), ServiceState::Starting);
    }

    #[tokio::test]
    async fn test_bind_conflict_marks_failed() {
        let first = Server::new(local_config()).bind().await.unwrap();
        let mut config = local_config();
        config.server.port = first.local_addr().port();

        let server = Server::new(config);
        let health = server.health();
        let err = server.bind().await.err().unwrap();
        assert!(matches!(err, Error::Bind { .. }));
        assert!(matches!(health.state(), ServiceState::Failed(_)));
    }

    #[tokio::test]
    async fn test_serve_lifecycle() {
        let bound = Server::new(local_config()).bind().await.unwrap();
        let health = bound.health();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let task = tokio::spawn(bound.serve(async move {
            let _ = rx.await;
        }));

        health.wait_ready(Duration::from_secs(5)).await.unwrap();
        assert_eq!(health.state(), ServiceState::Ready);

        tx.send(()).unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(health.state(), ServiceState::Stopped);
    }
}
