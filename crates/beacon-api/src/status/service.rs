//! Server status reporting.

use std::sync::Arc;
use std::time::Instant;

use beacon_core::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::probe::{MemoryProbe, MemorySnapshot};

/// Body of `GET /api/server-status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusResponse {
    /// Always `"UP"` when the endpoint answers.
    pub status: String,
    /// Configured application version.
    pub version: String,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Milliseconds since the status service started.
    pub uptime: u64,
    /// Processors available to this process.
    pub available_processors: usize,
    /// Total memory in bytes.
    pub total_memory: u64,
    /// Available memory in bytes.
    pub free_memory: u64,
    /// `totalMemory - freeMemory`.
    pub used_memory: u64,
}

impl ServerStatusResponse {
    /// Status reported by a running server.
    pub const UP: &'static str = "UP";

    /// Assemble a response stamped with the current time.
    pub fn from_parts(
        version: impl Into<String>,
        uptime_ms: u64,
        available_processors: usize,
        memory: MemorySnapshot,
    ) -> Self {
        Self {
            status: Self::UP.to_string(),
            version: version.into(),
            timestamp: Utc::now(),
            uptime: uptime_ms,
            available_processors,
            total_memory: memory.total,
            free_memory: memory.free,
            used_memory: memory.used(),
        }
    }
}

/// Body of `GET /api/server-status/uptime`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptimeResponse {
    /// Milliseconds since the status service started.
    pub uptime: u64,
}

/// What the status endpoints read from.
pub trait StatusSource: Send + Sync {
    /// Full status snapshot.
    fn status(&self) -> Result<ServerStatusResponse>;

    /// Milliseconds since start. Never decreases.
    fn uptime_ms(&self) -> u64;
}

/// [`StatusSource`] for the running process.
pub struct ServerStatusService {
    version: String,
    started: Instant,
    started_at: DateTime<Utc>,
    probe: Arc<dyn MemoryProbe>,
}

impl ServerStatusService {
    /// Start the uptime clock now.
    pub fn new(version: impl Into<String>, probe: Arc<dyn MemoryProbe>) -> Self {
        let started_at = Utc::now();
        tracing::info!(%started_at, "Server status service initialized");
        Self {
            version: version.into(),
            started: Instant::now(),
            started_at,
            probe,
        }
    }

    /// Wall-clock time the service started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Reported version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl StatusSource for ServerStatusService {
    fn status(&self) -> Result<ServerStatusResponse> {
        tracing::debug!("Retrieving server status");
        let memory = self.probe.snapshot()?;
        let response = ServerStatusResponse::from_parts(
            self.version.clone(),
            self.uptime_ms(),
            available_processors(),
            memory,
        );
        tracing::debug!(
            version = %self.version,
            uptime_ms = response.uptime,
            "Server status retrieved"
        );
        Ok(response)
    }

    fn uptime_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Processors available to this process, at least 1.
pub fn available_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
