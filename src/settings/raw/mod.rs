use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod api;
mod engine;

use api::ApiSection;
use engine::{ReposSection, SearchSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    api: ApiSection,
    search: SearchSection,
    repos: ReposSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.api.apply_cli_overrides(cli);
        self.search.apply_cli_overrides(cli);
        self.repos.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            base_url: detect_source(
                cli.api_url.is_some(),
                self.api.base_url.is_some(),
                "GHFIND__API__BASE_URL",
                "--api-url",
                "api.base_url",
            ),
            page_size: detect_source(
                cli.page_size.is_some(),
                self.repos.page_size.is_some(),
                "GHFIND__REPOS__PAGE_SIZE",
                "--page-size",
                "repos.page_size",
            ),
            debounce_ms: detect_source(
                cli.debounce_ms.is_some(),
                self.search.debounce_ms.is_some(),
                "GHFIND__SEARCH__DEBOUNCE_MS",
                "--debounce-ms",
                "search.debounce_ms",
            ),
            timeout_secs: self
                .api
                .timeout_secs
                .map(|_| detect_env_or_key("GHFIND__API__TIMEOUT_SECS", "api.timeout_secs")),
        };

        let config = ResolvedConfig {
            api: self.api.resolve(),
            session: engine::session_config(&self.search, &self.repos),
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

/// Source of a setting that has no CLI flag.
fn detect_env_or_key(env_var: &'static str, key: &'static str) -> SettingSource {
    if env::var_os(env_var).is_some() {
        SettingSource::Environment(env_var)
    } else {
        SettingSource::ConfigKey(key)
    }
}

#[cfg(test)]
mod tests;
