use std::fmt;

/// Where a configured value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Origins of the settings that validation can reject.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) base_url: Option<SettingSource>,
    pub(crate) page_size: Option<SettingSource>,
    pub(crate) debounce_ms: Option<SettingSource>,
    pub(crate) timeout_secs: Option<SettingSource>,
}

impl ConfigSources {
    pub(crate) fn source_for_base_url(&self) -> SettingSource {
        self.base_url
            .clone()
            .unwrap_or(SettingSource::ConfigKey("api.base_url"))
    }

    pub(crate) fn source_for_page_size(&self) -> SettingSource {
        self.page_size
            .clone()
            .unwrap_or(SettingSource::ConfigKey("repos.page_size"))
    }

    pub(crate) fn source_for_timeout(&self) -> SettingSource {
        self.timeout_secs
            .clone()
            .unwrap_or(SettingSource::ConfigKey("api.timeout_secs"))
    }

    pub(crate) fn source_for_debounce(&self) -> SettingSource {
        self.debounce_ms
            .clone()
            .unwrap_or(SettingSource::ConfigKey("search.debounce_ms"))
    }
}
