//! Common test utilities for beacon-api end-to-end tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use beacon_api::{ProcMeminfo, Server, ServerStatusService};
use beacon_core::{BeaconConfig, ServiceHandle};
use tempfile::NamedTempFile;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Secret key configured for every harness server.
pub const SECRET: &str = "e2e-secret";

/// Allowed token configured for every harness server.
pub const ALLOWED: &str = "e2e-allowed";

/// Fake `/proc/meminfo` with 16 GiB total and 4 GiB available.
pub const MEMINFO: &str = "\
MemTotal:       16777216 kB
MemFree:         1048576 kB
MemAvailable:    4194304 kB
Buffers:          123456 kB
";

/// A running server on an ephemeral port.
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
    /// Lifecycle handle.
    pub health: ServiceHandle,
    /// HTTP client.
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<beacon_api::Result<()>>>,
    _meminfo: NamedTempFile,
}

impl TestServer {
    /// Start a server with auth enabled.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start a server after adjusting the default test config.
    pub async fn start_with(adjust: impl FnOnce(&mut BeaconConfig)) -> Self {
        let mut meminfo = NamedTempFile::new().unwrap();
        meminfo.write_all(MEMINFO.as_bytes()).unwrap();

        let mut config = BeaconConfig::default();
        config.app.version = "9.9.9".to_string();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.auth.enabled = true;
        config.auth.secret_key = SECRET.to_string();
        config.auth.allowed_tokens = vec![format!("  {ALLOWED}  ")];
        adjust(&mut config);

        let status = ServerStatusService::new(
            config.app.version.clone(),
            Arc::new(ProcMeminfo::with_path(meminfo.path())),
        );
        let bound = Server::with_status_source(config, Arc::new(status))
            .bind()
            .await
            .unwrap();
        let addr = bound.local_addr();
        let health = bound.health();

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(bound.serve(async move {
            let _ = rx.await;
        }));
        health
            .wait_ready(std::time::Duration::from_secs(5))
            .await
            .unwrap();

        Self {
            addr,
            health,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            task: Some(task),
            _meminfo: meminfo,
        }
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET with an optional bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.unwrap()
    }

    /// Signal shutdown and wait for the server task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.unwrap().unwrap();
        }
    }
}
