use std::time::Duration;

use ghfind::directory::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::Deserialize;

use super::super::resolved::ApiSettings;
use super::super::util::non_blank;
use crate::cli::CliArgs;

/// `[api]` table: where and how to reach GitHub.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiSection {
    pub(super) base_url: Option<String>,
    pub(super) token: Option<String>,
    pub(super) user_agent: Option<String>,
    pub(super) timeout_secs: Option<u64>,
}

impl ApiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(url) = cli.api_url.clone() {
            self.base_url = Some(url);
        }
    }

    pub(super) fn resolve(self) -> ApiSettings {
        ApiSettings {
            base_url: non_blank(self.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: non_blank(self.token),
            user_agent: non_blank(self.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }
}
