//! The event-driven engine behind the search screen.
//!
//! A [`Session`] owns the location, the query and its debouncer, the search
//! orchestrator, the expansion and the repository pager. Front-ends feed it
//! [`Event`]s and perform the [`Effect`]s it returns; completed effects come
//! back as events.

use std::time::{Duration, Instant};

use crate::debounce::Debounced;
use crate::expansion::ExpansionCoordinator;
use crate::location::{CommitGate, HistoryMode, Location, UpdateSource, UrlParam};
use crate::repos::{DEFAULT_PAGE_SIZE, PageRequest, PageResult, RepoPager};
use crate::search::{SearchOrchestrator, SearchOutcome, SearchRequest, SearchResult, SearchSelection};

/// Query-string key holding the search query.
pub const QUERY_KEY: &str = "q";

/// Tunables for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long the query must stay unchanged before it is searched.
    pub debounce: Duration,
    pub page_size: u32,
    /// Staleness window for search results.
    pub search_stale: Duration,
    /// Staleness window for repository pages.
    pub repos_stale: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(400),
            page_size: DEFAULT_PAGE_SIZE,
            search_stale: Duration::from_secs(30),
            repos_stale: Duration::from_secs(30),
        }
    }
}

/// Work the session wants performed outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchUsers(SearchRequest),
    FetchPage(PageRequest),
}

/// Inputs to [`Session::handle`].
#[derive(Debug)]
pub enum Event {
    /// The query input now holds this text.
    QueryEdited(String),
    /// Time passed; settles the debounced query when due.
    Tick,
    /// Expand or collapse a candidate.
    ToggleExpanded(String),
    /// Move through the location history (negative is back).
    Traverse(isize),
    UsersLoaded(SearchResult),
    PageLoaded(PageResult),
    /// The end of the repository list scrolled into view.
    SentinelVisible,
    /// Repeat whichever failed request is on screen.
    Retry,
}

/// Search-as-you-type with location-bound state and paged repositories.
#[derive(Debug)]
pub struct Session<L: Location> {
    location: L,
    query: UrlParam,
    debounced: Debounced<String>,
    commits: CommitGate<String>,
    push_next_edit: bool,
    search: SearchOrchestrator,
    expansion: ExpansionCoordinator,
    pager: RepoPager,
}

impl<L: Location> Session<L> {
    /// Start a session from the state recorded in `location`.
    ///
    /// The initial query is searched right away without waiting for the
    /// debounce delay. Returns the effects that start it.
    pub fn new(location: L, config: SessionConfig, now: Instant) -> (Self, Vec<Effect>) {
        let query = UrlParam::read(&location, QUERY_KEY, "");
        let initial = query.value().to_string();
        let expansion = ExpansionCoordinator::new(&location, &initial);

        let mut session = Self {
            location,
            debounced: Debounced::new(initial.clone(), config.debounce),
            commits: CommitGate::with_baseline(initial.clone()),
            push_next_edit: true,
            search: SearchOrchestrator::new(config.search_stale),
            expansion,
            pager: RepoPager::new(config.page_size, config.repos_stale),
            query,
        };

        let mut effects = Vec::new();
        if let Some(request) = session.search.query_changed(&initial, now) {
            effects.push(Effect::SearchUsers(request));
        }
        session.reconcile(now, &mut effects);
        (session, effects)
    }

    /// Apply one event and return the effects it triggers.
    pub fn handle(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::QueryEdited(text) => self.edit_query(text, now),
            Event::Tick => {}
            Event::ToggleExpanded(login) => {
                self.expansion.toggle(&mut self.location, &login);
                self.push_next_edit = true;
            }
            Event::Traverse(delta) => self.traverse(delta, now),
            Event::UsersLoaded(result) => {
                self.search.resolve(result, now);
            }
            Event::PageLoaded(result) => {
                self.pager.resolve(result, now);
            }
            Event::Retry => {
                if let Some(request) = self.search.retry(now) {
                    effects.push(Effect::SearchUsers(request));
                }
                if let Some(request) = self.pager.retry() {
                    effects.push(Effect::FetchPage(request));
                }
            }
            Event::SentinelVisible => {
                if let Some(request) = self.pager.on_sentinel_visible() {
                    effects.push(Effect::FetchPage(request));
                }
            }
        }

        self.settle(now, &mut effects);
        self.reconcile(now, &mut effects);
        effects
    }

    /// When the pending query settles, if one is waiting.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounced.next_deadline()
    }

    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Query text as typed, before trimming or debouncing.
    #[must_use]
    pub fn query_text(&self) -> &str {
        self.query.value()
    }

    /// Whether the most recent query change came from history navigation.
    #[must_use]
    pub fn query_from_history(&self) -> bool {
        self.query.source() == UpdateSource::History
    }

    /// Query text the current search belongs to.
    #[must_use]
    pub fn settled_query(&self) -> &str {
        self.debounced.value()
    }

    #[must_use]
    pub fn search(&self) -> &SearchOrchestrator {
        &self.search
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionCoordinator {
        &self.expansion
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expansion.expanded()
    }

    #[must_use]
    pub fn pager(&self) -> &RepoPager {
        &self.pager
    }

    /// Returns `true` once after the repository listing switched users.
    pub fn take_scroll_reset(&mut self) -> bool {
        self.pager.take_scroll_reset()
    }

    /// Snapshot of the session for reporting once it ends.
    #[must_use]
    pub fn outcome(&self) -> SearchOutcome {
        let location = self
            .location
            .search()
            .filter(|search| !search.is_empty())
            .map(|search| format!("?{search}"))
            .unwrap_or_default();
        let selection = self.expansion.expanded().map(|login| SearchSelection {
            login: login.to_string(),
            user: self
                .search
                .visible_users()
                .iter()
                .find(|user| user.login == login)
                .cloned(),
        });

        SearchOutcome {
            query: self.query.value().to_string(),
            location,
            selection,
        }
    }

    fn edit_query(&mut self, text: String, now: Instant) {
        if text == self.query.value() {
            return;
        }
        let mode = if std::mem::take(&mut self.push_next_edit) {
            HistoryMode::Push
        } else {
            HistoryMode::Replace
        };
        self.query.write(&mut self.location, Some(&text), mode);
        self.debounced.set(text, now);
    }

    fn traverse(&mut self, delta: isize, now: Instant) {
        if !self.location.traverse(delta) {
            return;
        }
        tracing::debug!(delta, "history traversed");

        if self.query.sync_from_history(&self.location) {
            self.debounced.set(self.query.value().to_string(), now);
        }
        self.expansion.sync_from_history(&self.location);
        self.push_next_edit = true;
    }

    fn settle(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let Some(value) = self.debounced.poll(now).cloned() else {
            return;
        };

        if self.commits.observe(&value, self.query.source()) {
            tracing::debug!(query = %value, "query committed");
            self.push_next_edit = true;
        }

        self.expansion.sync_query(&mut self.location, &value);
        if let Some(request) = self.search.query_changed(&value, now) {
            effects.push(Effect::SearchUsers(request));
        }
    }

    /// Point the pager at the expanded candidate while it is visible.
    fn reconcile(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let target = self
            .expansion
            .expanded()
            .filter(|login| self.search.is_visible(login));
        if let Some(request) = self.pager.select(target, now) {
            effects.push(Effect::FetchPage(request));
        }
    }
}
