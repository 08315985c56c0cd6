//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive when `RUST_LOG` is unset.
///
/// `--verbose` beats `--quiet` beats the configured level.
pub fn default_directive(verbose: bool, quiet: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else if quiet {
        "warn".to_string()
    } else if configured.trim().is_empty() {
        "info".to_string()
    } else {
        configured.trim().to_string()
    }
}

/// Install the global subscriber. `RUST_LOG` wins over everything else.
pub fn init(verbose: bool, quiet: bool, configured: &str) {
    let fallback = default_directive(verbose, quiet, configured);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
