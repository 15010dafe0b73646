//! Diagnostic logging.
//!
//! The terminal belongs to the chat window, so tracing output only goes to a
//! file named on the command line. Without one, no subscriber is installed and
//! `tracing` macros are no-ops.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV_VAR: &str = "MINICHAT_LOG";
const DEFAULT_FILTER: &str = "minichat=info";

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a file-backed subscriber. Appends to `path`, creating it if needed.
pub fn init_file_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
