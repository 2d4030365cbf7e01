use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use ghfind::directory::{BuildProfile, Directory, DirectoryClient, Repository, UserCandidate};
use ghfind::{
    App, Event, Executor, Location, MemoryHistory, Notice, SearchOutcome, Session, SessionConfig, run,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::settings::ResolvedConfig;

/// Longest wait for a single request in headless mode.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What the binary prints once a session ends.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Report {
    #[serde(flatten)]
    pub(crate) outcome: SearchOutcome,
    /// Candidates visible when the session ended. Empty for interactive runs.
    pub(crate) users: Vec<UserCandidate>,
    /// Repositories loaded for the expanded account, most popular first.
    pub(crate) repositories: Vec<Repository>,
    pub(crate) has_more: bool,
    pub(crate) notices: Vec<String>,
}

impl Report {
    fn interactive(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            users: Vec::new(),
            repositories: Vec::new(),
            has_more: false,
            notices: Vec::new(),
        }
    }

    fn from_session<L: Location>(session: &Session<L>) -> Self {
        let notices = [session.search().notice(), session.pager().notice()]
            .into_iter()
            .flatten()
            .map(|notice| match notice {
                Notice::RateLimit { headline, detail } => format!("{headline}: {detail}"),
                Notice::Inline(message) => message,
            })
            .collect();

        Self {
            outcome: session.outcome(),
            users: session.search().visible_users().to_vec(),
            repositories: session.pager().repositories().to_vec(),
            has_more: session.pager().has_next_page(),
            notices,
        }
    }
}

/// Coordinates building and running a search session.
pub(crate) struct SearchWorkflow<D: Directory> {
    executor: Executor<D>,
    session: SessionConfig,
    location: String,
    headless: bool,
    pages: u32,
}

impl SearchWorkflow<DirectoryClient> {
    pub(crate) fn from_config(config: ResolvedConfig, cli: &CliArgs) -> Result<Self> {
        let options = config.api.client_options(BuildProfile::current());
        let client = DirectoryClient::new(options)?;
        if client.has_credential() {
            info!("sending a development token with GitHub requests");
        }
        Self::with_directory(client, config.session, cli)
    }
}

impl<D: Directory> SearchWorkflow<D> {
    fn with_directory(directory: D, session: SessionConfig, cli: &CliArgs) -> Result<Self> {
        Ok(Self {
            executor: Executor::new(directory)?,
            session,
            location: cli.initial_location(),
            headless: cli.headless,
            pages: cli.pages.max(1),
        })
    }

    pub(crate) fn run(self) -> Result<Report> {
        if self.headless {
            return self.run_headless();
        }

        let (session, effects) = Session::new(
            MemoryHistory::new(&self.location),
            self.session,
            Instant::now(),
        );
        let outcome = run(App::new(session, effects), &self.executor)?;
        Ok(Report::interactive(outcome))
    }

    /// Resolve the initial location without a terminal: search, expand and
    /// load up to `pages` repository pages.
    fn run_headless(self) -> Result<Report> {
        let (mut session, effects) = Session::new(
            MemoryHistory::new(&self.location),
            self.session,
            Instant::now(),
        );
        self.executor.dispatch(effects);
        self.settle(&mut session)?;

        for page in 1..self.pages {
            if !session.pager().wants_next_page() {
                break;
            }
            debug!(page = page + 1, "loading next repository page");
            self.executor
                .dispatch(session.handle(Event::SentinelVisible, Instant::now()));
            self.settle(&mut session)?;
        }

        Ok(Report::from_session(&session))
    }

    /// Feed completions back until nothing is in flight.
    fn settle(&self, session: &mut Session<MemoryHistory>) -> Result<()> {
        while session.search().is_loading() || session.pager().is_fetching() {
            let Some(completion) = self.executor.recv_timeout(REQUEST_TIMEOUT) else {
                bail!("timed out waiting for GitHub after {REQUEST_TIMEOUT:?}");
            };
            self.executor
                .dispatch(session.handle(completion.into(), Instant::now()));
        }
        Ok(())
    }
}
