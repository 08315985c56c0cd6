//! # beacon-api
//!
//! HTTP API server for Beacon.
//!
//! This crate provides:
//! - Server status and uptime endpoints behind bearer token auth
//! - Public token check/validate endpoints
//! - An actuator-style health endpoint driven by the server lifecycle
//! - An OpenAPI 3 document describing all of the above
//!
//! ```rust,no_run
//! use beacon_api::Server;
//! use beacon_core::BeaconConfig;
//!
//! # async fn run() -> beacon_api::Result<()> {
//! let config = BeaconConfig::load(None)?;
//! Server::new(config).run().await
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod status;

pub use error::{Error, Result};
pub use routes::router;
pub use server::{shutdown_signal, BoundServer, Server};
pub use state::AppState;
pub use status::{
    MemoryProbe, MemorySnapshot, ProcMeminfo, ServerStatusResponse, ServerStatusService,
    StatusSource, UptimeResponse,
};
