use super::ResolvedConfig;
use super::super::util::redact;

pub(super) fn print_summary(config: &ResolvedConfig) {
    for line in summary_lines(config) {
        println!("{line}");
    }
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
    let token = match &config.api.token {
        Some(token) if cfg!(debug_assertions) => redact(token),
        Some(_) => "(ignored in release builds)".to_string(),
        None => "(none)".to_string(),
    };

    vec![
        "Effective configuration:".to_string(),
        format!("  API base URL: {}", config.api.base_url),
        format!("  User agent: {}", config.api.user_agent),
        format!("  Token: {token}"),
        format!("  Request timeout: {} s", config.api.timeout.as_secs()),
        format!("  Debounce: {} ms", config.session.debounce.as_millis()),
        format!(
            "  Search staleness: {} s",
            config.session.search_stale.as_secs()
        ),
        format!("  Page size: {}", config.session.page_size),
        format!(
            "  Repository staleness: {} s",
            config.session.repos_stale.as_secs()
        ),
    ]
}
