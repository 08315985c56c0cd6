//! # beacon-cli
//!
//! Command-line interface for Beacon.
//!
//! - `serve`: run the HTTP API
//! - `probe`: fetch `/api/server-status` from a running server
//! - `config`: inspect and edit the TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config_handlers;
pub mod error;
pub mod logging;
pub mod probe;
pub mod serve;

pub use cli::{Cli, Command, ConfigAction};
pub use error::{Error, Result};
