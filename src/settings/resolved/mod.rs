use std::time::Duration;

use ghfind::SessionConfig;
use ghfind::directory::{BuildProfile, ClientOptions, Credential};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Connection settings for the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Bearer token. Only honoured by development builds.
    pub token: Option<String>,
    pub user_agent: String,
    /// Bound on a single request.
    pub timeout: Duration,
}

impl ApiSettings {
    /// Client options for the given build profile.
    pub fn client_options(&self, profile: BuildProfile) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            credential: Credential::for_profile(profile, self.token.as_deref()),
            timeout: self.timeout,
        }
    }
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api: ApiSettings,
    pub session: SessionConfig,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        summary::print_summary(self);
    }
}
