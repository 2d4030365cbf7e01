use ghfind_directory::UserCandidate;
use serde::Serialize;

/// Captures the state of the session when the user leaves it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Query text as last typed.
    pub query: String,
    /// Relative URL of the final location (`?q=...&expanded=...`).
    pub location: String,
    pub selection: Option<SearchSelection>,
}

/// The account that was expanded when the session ended.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSelection {
    pub login: String,
    /// Candidate details, when the account is among the visible results.
    pub user: Option<UserCandidate>,
}

impl SearchOutcome {
    /// Return the expanded account's login, if any.
    #[must_use]
    pub fn expanded_login(&self) -> Option<&str> {
        self.selection.as_ref().map(|selection| selection.login.as_str())
    }
}
