use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `ghfind` binary.
#[derive(Parser, Debug)]
#[command(
    name = "ghfind",
    version,
    long_version = long_version(),
    about = "Search GitHub users and browse their repositories from the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "GHFIND_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long = "url",
        value_name = "QUERY-STRING",
        help = "Start from a location such as '?q=octo&expanded=octocat' (default: empty)"
    )]
    pub(crate) url: Option<String>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Provide an initial search query, overriding --url (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "LOGIN",
        help = "Expand this account once results arrive, overriding --url (default: none)"
    )]
    pub(crate) expanded: Option<String>,
    #[arg(
        long = "page-size",
        value_name = "NUM",
        help = "Repositories requested per page, 1-100 (default: 10)"
    )]
    pub(crate) page_size: Option<u32>,
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        help = "Delay before a typed query is searched (default: 400)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        long = "api-url",
        value_name = "URL",
        env = "GHFIND_API_URL",
        help = "Base URL of the GitHub REST API (default: https://api.github.com)"
    )]
    pub(crate) api_url: Option<String>,
    #[arg(
        long,
        help = "Resolve the initial location without the terminal UI and print the results (default: disabled)"
    )]
    pub(crate) headless: bool,
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 1,
        help = "Repository pages to load for the expanded account in headless mode"
    )]
    pub(crate) pages: u32,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

impl CliArgs {
    /// The initial location: `--url` with `--query` and `--expanded` applied
    /// on top.
    pub(crate) fn initial_location(&self) -> String {
        let mut search = self
            .url
            .as_deref()
            .map(|url| url.rsplit_once('?').map_or(url, |(_, query)| query))
            .unwrap_or_default()
            .to_string();
        if let Some(query) = &self.query {
            search = ghfind::location::set_param(&search, "q", Some(query));
        }
        if let Some(login) = &self.expanded {
            search = ghfind::location::set_param(&search, "expanded", Some(login));
        }
        search
    }
}
