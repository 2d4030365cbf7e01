use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ghfind::app_dirs::AppDirs;

/// Produce the full version banner including the config and cache
/// directories.
pub(super) fn long_version() -> &'static str {
    let (config_dir, cache_dir) = match AppDirs::resolve() {
        Ok(dirs) => (
            dirs.config_dir().display().to_string(),
            dirs.cache_dir().display().to_string(),
        ),
        Err(err) => {
            let unavailable = format!("unavailable ({err})");
            (unavailable.clone(), unavailable)
        }
    };

    let mut details = format!("ghfind {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "cache directory: {cache_dir}");
    let _ = writeln!(details, "api: {}", ghfind::directory::DEFAULT_BASE_URL);

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
pub(super) fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}
