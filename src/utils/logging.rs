//! Tracing subscriber setup.
//!
//! The terminal front end owns the screen, so its logs go to a file in
//! ~/.sidescroll/. Headless tools log to stderr.

use super::persistence::{app_path, LOG_FILE};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `debug` when verbose, `info` when not.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Append logs to ~/.sidescroll/sidescroll.log. Returns the log path.
pub fn init_file_logging(verbose: bool) -> io::Result<PathBuf> {
    let path = app_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}

/// Log to stderr.
pub fn init_stderr_logging(verbose: bool) {
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .try_init();
}
