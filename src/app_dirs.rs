//! Where `ghfind` keeps its configuration and log file.
//!
//! Platform locations come from the `directories` crate; each can be
//! overridden through an environment variable.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "ghfind";

pub const CONFIG_DIR_ENV: &str = "GHFIND_CONFIG_DIR";
pub const CACHE_DIR_ENV: &str = "GHFIND_CACHE_DIR";

/// Resolved application directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    config: PathBuf,
    cache: PathBuf,
}

impl AppDirs {
    /// Resolve both directories, preferring environment overrides.
    pub fn resolve() -> Result<Self> {
        let config = dir_from_env(CONFIG_DIR_ENV);
        let cache = dir_from_env(CACHE_DIR_ENV);
        if let (Some(config), Some(cache)) = (&config, &cache) {
            return Ok(Self::new(config.clone(), cache.clone()));
        }

        let project = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| anyhow!("unable to determine project directories for ghfind"))?;
        Ok(Self::new(
            config.unwrap_or_else(|| project.config_local_dir().to_path_buf()),
            cache.unwrap_or_else(|| project.cache_dir().to_path_buf()),
        ))
    }

    #[must_use]
    pub fn new(config: PathBuf, cache: PathBuf) -> Self {
        Self { config, cache }
    }

    /// Directory holding `config.toml`.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config
    }

    /// Directory for disposable files such as the log.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache
    }

    /// The user configuration file inside [`AppDirs::config_dir`].
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }
}

/// Read an override directory. An empty value counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
