//! File-backed tracing setup.
//!
//! The terminal belongs to the UI while a session runs, so events go to
//! `ghfind.log` in the cache directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "GHFIND_LOG";

const LOG_FILE: &str = "ghfind.log";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `<dir>/ghfind.log`.
///
/// Returns the log path, or `None` when the file could not be opened or a
/// subscriber is already installed; logging is then left disabled.
pub fn initialize(dir: &Path) -> Option<PathBuf> {
    fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(path = ?path, version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Some(path)
}
