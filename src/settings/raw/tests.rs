use std::time::Duration;

use clap::Parser;
use config::{Config, File, FileFormat};

use super::RawConfig;
use crate::cli::CliArgs;

fn from_toml(text: &str) -> RawConfig {
    Config::builder()
        .add_source(File::from_str(text, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn empty_configuration_uses_defaults() {
    let cli = CliArgs::parse_from(["ghfind"]);
    let resolved = RawConfig::default().resolve(&cli).unwrap();

    assert_eq!(resolved.api.base_url, "https://api.github.com");
    assert_eq!(resolved.api.token, None);
    assert!(resolved.api.user_agent.starts_with("ghfind/"));
    assert_eq!(resolved.session.debounce, Duration::from_millis(400));
    assert_eq!(resolved.session.page_size, 10);
    assert_eq!(resolved.session.search_stale, Duration::from_secs(30));
    assert_eq!(resolved.api.timeout, Duration::from_secs(15));
}

#[test]
fn file_values_are_read_per_section() {
    let raw = from_toml(
        r#"
        [api]
        base_url = "http://127.0.0.1:9000"
        token = "  ghp_secret  "
        timeout_secs = 5

        [search]
        debounce_ms = 250
        stale_secs = 0

        [repos]
        page_size = 30
        stale_secs = 60
        "#,
    );
    let resolved = raw.resolve(&CliArgs::parse_from(["ghfind"])).unwrap();

    assert_eq!(resolved.api.base_url, "http://127.0.0.1:9000");
    assert_eq!(resolved.api.token.as_deref(), Some("ghp_secret"));
    assert_eq!(resolved.api.timeout, Duration::from_secs(5));
    assert_eq!(resolved.session.debounce, Duration::from_millis(250));
    assert_eq!(resolved.session.search_stale, Duration::ZERO);
    assert_eq!(resolved.session.page_size, 30);
    assert_eq!(resolved.session.repos_stale, Duration::from_secs(60));
}

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "ghfind",
        "--api-url",
        "http://localhost:8080",
        "--page-size",
        "50",
        "--debounce-ms",
        "100",
    ]);
    let mut raw = from_toml("[repos]\npage_size = 20\n[search]\ndebounce_ms = 900\n");
    raw.apply_cli_overrides(&cli);

    assert_eq!(raw.api.base_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(raw.repos.page_size, Some(50));
    assert_eq!(raw.search.debounce_ms, Some(100));
}

#[test]
fn out_of_range_page_size_names_the_flag() {
    let cli = CliArgs::parse_from(["ghfind", "--page-size", "500"]);
    let mut raw = RawConfig::default();
    raw.apply_cli_overrides(&cli);

    let err = raw.resolve(&cli).unwrap_err().to_string();
    assert!(err.contains("repos.page_size"));
    assert!(err.contains("--page-size"));
    assert!(err.contains("value: 500"));
}

#[test]
fn zero_timeout_names_the_config_key() {
    let raw = from_toml("[api]\ntimeout_secs = 0\n");
    let err = raw
        .resolve(&CliArgs::parse_from(["ghfind"]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("api.timeout_secs"));
    assert!(err.contains("configuration key"));
}
