use std::time::Duration;

use url::Url;

use super::{ConfigError, ConfigSources, ResolvedConfig};

/// GitHub caps `per_page` at 100.
const MAX_PAGE_SIZE: u32 = 100;
const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

pub(super) fn validate(
    config: &ResolvedConfig,
    sources: &ConfigSources,
) -> Result<(), ConfigError> {
    let page_size = config.session.page_size;
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ConfigError::invalid(
            "repos.page_size",
            page_size.to_string(),
            sources.source_for_page_size(),
            format!("must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }

    if config.session.debounce > MAX_DEBOUNCE {
        return Err(ConfigError::invalid(
            "search.debounce_ms",
            config.session.debounce.as_millis().to_string(),
            sources.source_for_debounce(),
            "must not exceed 10000",
        ));
    }

    if config.api.timeout.is_zero() {
        return Err(ConfigError::invalid(
            "api.timeout_secs",
            "0",
            sources.source_for_timeout(),
            "must be at least 1 second",
        ));
    }

    match Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(_) => {
            return Err(ConfigError::invalid(
                "api.base_url",
                config.api.base_url.clone(),
                sources.source_for_base_url(),
                "must use http or https",
            ));
        }
        Err(err) => {
            return Err(ConfigError::invalid(
                "api.base_url",
                config.api.base_url.clone(),
                sources.source_for_base_url(),
                err.to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ghfind::SessionConfig;
    use ghfind::directory::DEFAULT_TIMEOUT;

    use super::super::{ApiSettings, SettingSource};
    use super::*;

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            api: ApiSettings {
                base_url: "https://api.github.com".into(),
                token: None,
                user_agent: "ghfind/test".into(),
                timeout: DEFAULT_TIMEOUT,
            },
            session: SessionConfig::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&config(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn validation_rejects_zero_page_size() {
        let mut config = config();
        config.session.page_size = 0;
        let sources = ConfigSources {
            page_size: Some(SettingSource::Environment("GHFIND__REPOS__PAGE_SIZE")),
            ..ConfigSources::default()
        };

        let err = validate(&config, &sources).unwrap_err();
        assert_eq!(err.key, "repos.page_size");
        let message = err.to_string();
        assert!(message.contains("value: 0"));
        assert!(message.contains("environment variable"));
    }

    #[test]
    fn validation_rejects_non_http_base_urls() {
        let mut config = config();
        config.api.base_url = "ftp://example.test".into();
        let err = validate(&config, &ConfigSources::default()).unwrap_err();
        assert_eq!(err.key, "api.base_url");
        assert!(err.to_string().contains("configuration key `api.base_url`"));

        config.api.base_url = "not a url".into();
        assert!(validate(&config, &ConfigSources::default()).is_err());
    }

    #[test]
    fn validation_rejects_a_zero_timeout() {
        let mut config = config();
        config.api.timeout = Duration::ZERO;
        let err = validate(&config, &ConfigSources::default()).unwrap_err();
        assert_eq!(err.key, "api.timeout_secs");
    }

    #[test]
    fn validation_rejects_huge_debounce() {
        let mut config = config();
        config.session.debounce = Duration::from_secs(60);
        let err = validate(&config, &ConfigSources::default()).unwrap_err();
        assert_eq!(err.key, "search.debounce_ms");
    }
}
