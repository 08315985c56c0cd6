//! Beacon Core: shared types, errors, configuration, and lifecycle state.
//!
//! This crate provides the foundational types used across all Beacon crates.
//! It has no internal Beacon dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: TOML configuration with environment overrides
//! - [`service`]: Service lifecycle state and observable handle
//! - [`http`]: JSON error body returned by every failing endpoint

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;
pub mod service;

// Re-export key types at crate root for convenience
pub use config::BeaconConfig;
pub use error::{Error, Result};
pub use http::ApiError;
pub use service::{ServiceHandle, ServiceState};
