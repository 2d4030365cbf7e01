//! Tracks which search candidate is expanded to show its repositories.

use crate::location::{HistoryMode, Location, UpdateSource, UrlParam};

/// Query-string key recording the expanded login.
pub const EXPANDED_KEY: &str = "expanded";

/// Keeps at most one candidate expanded and mirrors it into the location.
///
/// The expansion belongs to the query it was made under: once the settled,
/// trimmed query changes, any expansion is cleared.
#[derive(Debug, Clone)]
pub struct ExpansionCoordinator {
    param: UrlParam,
    query: String,
}

impl ExpansionCoordinator {
    /// Restore the expansion from `location` for a session whose settled
    /// query is `query`.
    pub fn new<L: Location + ?Sized>(location: &L, query: &str) -> Self {
        Self {
            param: UrlParam::read(location, EXPANDED_KEY, ""),
            query: query.trim().to_string(),
        }
    }

    /// The expanded login, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        Some(self.param.value()).filter(|login| !login.is_empty())
    }

    #[must_use]
    pub fn is_expanded(&self, login: &str) -> bool {
        self.expanded() == Some(login)
    }

    #[must_use]
    pub fn source(&self) -> UpdateSource {
        self.param.source()
    }

    /// Expand `login`, or collapse it if it is already expanded. Each toggle
    /// gets its own history entry.
    pub fn toggle<L: Location + ?Sized>(&mut self, location: &mut L, login: &str) {
        let next = if self.is_expanded(login) { None } else { Some(login) };
        tracing::debug!(login, expanded = next.is_some(), "expansion toggled");
        self.param.write(location, next, HistoryMode::Push);
    }

    /// Note the settled query. Clears the expansion in place when the
    /// trimmed query differs from the one it was made under; returns whether
    /// anything was cleared.
    pub fn sync_query<L: Location + ?Sized>(&mut self, location: &mut L, query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed == self.query {
            return false;
        }
        self.query = trimmed.to_string();

        if self.expanded().is_none() {
            return false;
        }
        tracing::debug!(query = %self.query, "query changed, collapsing expansion");
        self.param.write(location, None, HistoryMode::Replace);
        true
    }

    /// Re-read the expansion after back/forward navigation.
    pub fn sync_from_history<L: Location + ?Sized>(&mut self, location: &L) -> bool {
        self.param.sync_from_history(location)
    }
}
