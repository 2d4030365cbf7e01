mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use ghfind::app_dirs::AppDirs;
use ghfind::logging;
use settings::ResolvedConfig;
use tracing::{debug, warn};
use workflow::SearchWorkflow;

use crate::cli::CliArgs;

fn main() -> Result<()> {
    let cli = parse_cli();

    let dirs = match AppDirs::resolve() {
        Ok(dirs) => Some(dirs),
        Err(err) => {
            eprintln!("ghfind: {err}; continuing without default config files");
            None
        }
    };
    if let Some(dirs) = &dirs
        && let Some(path) = logging::initialize(dirs.cache_dir())
    {
        debug!(path = %path.display(), "logging initialised");
    }

    let resolved = settings::load(&cli, dirs.as_ref())?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_search(&cli, resolved)
}

/// Execute the search workflow and print output in the chosen format.
fn run_search(cli: &CliArgs, settings: ResolvedConfig) -> Result<()> {
    let workflow = SearchWorkflow::from_config(settings, cli)?;
    let report = match workflow.run() {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "search session failed");
            return Err(err);
        }
    };

    match cli.output {
        OutputFormat::Plain => print_plain(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}
