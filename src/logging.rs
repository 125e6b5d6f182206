//! Logging configuration using the tracing ecosystem.
//!
//! Diagnostics go to stderr so they never mix with command output on
//! stdout. `--verbose` enables debug output for this crate, which includes a
//! line per HTTP request and response. `RUST_LOG` overrides both.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when neither `RUST_LOG` nor `--verbose` is set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Filter used with `--verbose`.
const VERBOSE_LOG_FILTER: &str = "jtk=debug,warn";

/// Initialize the logging system.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .with_level(verbose),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jtk starting");
    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}
