//! Command-line definitions.

use clap::{Parser, Subcommand};

/// Beacon - server status API with bearer token authentication
#[derive(Parser, Debug)]
#[command(name = "beacon", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "BEACON_CONFIG")]
    pub config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Listen host, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Listen port, overrides `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch the status of a running server
    Probe {
        /// Base URL of the server (default derived from config)
        #[arg(short, long)]
        url: Option<String>,

        /// Bearer token (default: `auth.secret_key` from config)
        #[arg(short, long, env = "BEACON_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Inspect or edit configuration
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `beacon config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target file (default: platform config directory)
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as `BEACON_*` environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}
