use std::time::Duration;

use ghfind::SessionConfig;
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
    pub(super) debounce_ms: Option<u64>,
    pub(super) stale_secs: Option<u64>,
}

impl SearchSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.debounce_ms {
            self.debounce_ms = Some(value);
        }
    }
}

/// `[repos]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ReposSection {
    pub(super) page_size: Option<u32>,
    pub(super) stale_secs: Option<u64>,
}

impl ReposSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.page_size {
            self.page_size = Some(value);
        }
    }
}

/// Fill the session tunables, keeping defaults for anything unset.
pub(super) fn session_config(search: &SearchSection, repos: &ReposSection) -> SessionConfig {
    let defaults = SessionConfig::default();
    SessionConfig {
        debounce: search
            .debounce_ms
            .map_or(defaults.debounce, Duration::from_millis),
        page_size: repos.page_size.unwrap_or(defaults.page_size),
        search_stale: search
            .stale_secs
            .map_or(defaults.search_stale, Duration::from_secs),
        repos_stale: repos
            .stale_secs
            .map_or(defaults.repos_stale, Duration::from_secs),
    }
}
