use std::time::{Duration, Instant};

use ghfind_directory::UserCandidate;

use super::{MAX_VISIBLE_USERS, SEARCH_FAILURE_FALLBACK, SearchRequest, SearchResult};
use crate::cache::StaleCache;
use crate::failure::{Failure, Notice};

/// Lifecycle of the search for the current debounced query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// The query is blank.
    Idle,
    /// A request for the current query is in flight.
    Loading,
    /// Results for the current query, possibly empty.
    Ready(Vec<UserCandidate>),
    Failed(Failure),
}

/// Turns debounced query changes into user searches and applies their
/// results, ignoring any response that belongs to a superseded query.
#[derive(Debug)]
pub struct SearchOrchestrator {
    query: String,
    next_query_id: u64,
    current_query_id: Option<u64>,
    phase: SearchPhase,
    cache: StaleCache<String, Vec<UserCandidate>>,
}

impl SearchOrchestrator {
    /// Create an idle orchestrator. Successful results are reused for
    /// `stale_for` when the same query comes back.
    #[must_use]
    pub fn new(stale_for: Duration) -> Self {
        Self {
            query: String::new(),
            next_query_id: 0,
            current_query_id: None,
            phase: SearchPhase::Idle,
            cache: StaleCache::new(stale_for),
        }
    }

    /// Trimmed text of the query the current phase belongs to.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    /// React to a new debounced query.
    ///
    /// Returns the request to perform, or `None` when the query is blank,
    /// unchanged, or answered from the staleness window. An unchanged query
    /// whose last search failed is searched again.
    pub fn query_changed(&mut self, debounced: &str, now: Instant) -> Option<SearchRequest> {
        let trimmed = debounced.trim();
        if trimmed == self.query && !matches!(self.phase, SearchPhase::Failed(_)) {
            return None;
        }

        self.query = trimmed.to_string();
        self.current_query_id = None;

        if self.query.is_empty() {
            self.phase = SearchPhase::Idle;
            return None;
        }

        if let Some(users) = self.cache.get(&self.query, now) {
            tracing::debug!(query = %self.query, "search served from cache");
            self.phase = SearchPhase::Ready(users);
            return None;
        }

        self.next_query_id = self.next_query_id.saturating_add(1);
        let id = self.next_query_id;
        self.current_query_id = Some(id);
        self.phase = SearchPhase::Loading;
        tracing::debug!(id, query = %self.query, "search issued");

        Some(SearchRequest {
            id,
            query: self.query.clone(),
        })
    }

    /// Search the current query again after a failure.
    pub fn retry(&mut self, now: Instant) -> Option<SearchRequest> {
        if !matches!(self.phase, SearchPhase::Failed(_)) {
            return None;
        }
        let query = self.query.clone();
        self.query_changed(&query, now)
    }

    #[must_use]
    pub fn matches_latest(&self, result_id: u64) -> bool {
        Some(result_id) == self.current_query_id
    }

    /// Apply a completed search. Returns `false` when the result belongs to a
    /// superseded query and was discarded.
    pub fn resolve(&mut self, result: SearchResult, now: Instant) -> bool {
        if !self.matches_latest(result.id) {
            tracing::debug!(id = result.id, "discarding stale search result");
            return false;
        }
        self.current_query_id = None;

        self.phase = match result.outcome {
            Ok(users) => {
                self.cache.insert(self.query.clone(), users.clone(), now);
                SearchPhase::Ready(users)
            }
            Err(err) => {
                tracing::warn!(query = %self.query, error = %err, "search failed");
                SearchPhase::Failed(Failure::from_error(&err))
            }
        };
        true
    }

    /// Candidates to display, capped at [`MAX_VISIBLE_USERS`].
    #[must_use]
    pub fn visible_users(&self) -> &[UserCandidate] {
        match &self.phase {
            SearchPhase::Ready(users) => &users[..users.len().min(MAX_VISIBLE_USERS)],
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_visible(&self, login: &str) -> bool {
        self.visible_users().iter().any(|user| user.login == login)
    }

    /// Status text accompanying the current phase.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        match &self.phase {
            SearchPhase::Idle | SearchPhase::Failed(_) => None,
            SearchPhase::Loading => Some("Searching users...".to_string()),
            SearchPhase::Ready(users) if users.is_empty() => Some("No users found.".to_string()),
            SearchPhase::Ready(_) => Some(format!("Search results for “{}”", self.query)),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match &self.phase {
            SearchPhase::Failed(failure) => Some(failure.notice(SEARCH_FAILURE_FALLBACK)),
            _ => None,
        }
    }
}
