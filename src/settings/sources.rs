use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use ghfind::app_dirs::AppDirs;

use crate::cli::CliArgs;

/// Prefix of environment variables read as configuration (`GHFIND__API__TOKEN`).
pub(super) const ENV_PREFIX: &str = "GHFIND";

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs, dirs: Option<&AppDirs>) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files(dirs) {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

/// Default configuration files, lowest precedence first.
pub(super) fn default_config_files(dirs: Option<&AppDirs>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Some(dirs) = dirs {
        files.push(dirs.config_file());
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".ghfind.toml"));
        files.push(current_dir.join("ghfind.toml"));
    }

    files
}
