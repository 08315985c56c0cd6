//! Beacon CLI
//!
//! Entry point for the `beacon` binary.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use beacon_cli::{config_handlers, logging, probe, serve, Cli, Command};
use beacon_core::BeaconConfig;
use clap::Parser;

fn load_config(cli: &Cli) -> Result<BeaconConfig> {
    let config = BeaconConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(cli.verbose, cli.quiet, &config.logging.level);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Serve { host, port } => {
            let mut config = load_config(&cli)?;
            serve::apply_overrides(&mut config, host.clone(), *port);
            serve::cmd_serve(config).await.context("server failed")?;
        }
        Command::Probe { url, token } => {
            let config = load_config(&cli)?;
            probe::cmd_probe(&config, url.as_deref(), token.as_deref())
                .await
                .context("probe failed")?;
        }
        Command::Config { action } => {
            // No config load here: `config init` must work without a file.
            logging::init(cli.verbose, cli.quiet, "warn");
            config_handlers::handle_config_command(cli.config.as_deref(), action)
                .context("config command failed")?;
        }
    }
    Ok(())
}
