use super::{HistoryMode, Location, UpdateSource, get_param, set_param};

/// One query-string key mirrored into in-memory state.
#[derive(Debug, Clone)]
pub struct UrlParam {
    key: String,
    default: String,
    value: String,
    source: UpdateSource,
}

impl UrlParam {
    /// Read `key` from `location`, falling back to `default` when the key is
    /// absent or there is no browsing context.
    pub fn read<L: Location + ?Sized>(location: &L, key: &str, default: &str) -> Self {
        Self {
            key: key.to_string(),
            default: default.to_string(),
            value: read_value(location, key, default),
            source: UpdateSource::Initial,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn source(&self) -> UpdateSource {
        self.source
    }

    /// Record a user-initiated value and mirror it into the location.
    ///
    /// `None` or an empty string removes the key from the query string
    /// instead of serializing an empty value.
    pub fn write<L: Location + ?Sized>(
        &mut self,
        location: &mut L,
        value: Option<&str>,
        mode: HistoryMode,
    ) {
        self.source = UpdateSource::User;
        self.value = value.unwrap_or_default().to_string();

        if let Some(search) = location.search() {
            let next = set_param(&search, &self.key, value);
            location.write(next, mode);
        }
    }

    /// Re-read the value after history traversal. Returns `true` when the
    /// value changed.
    pub fn sync_from_history<L: Location + ?Sized>(&mut self, location: &L) -> bool {
        self.source = UpdateSource::History;
        let next = read_value(location, &self.key, &self.default);
        if next == self.value {
            return false;
        }
        tracing::debug!(key = %self.key, value = %next, "location param restored from history");
        self.value = next;
        true
    }
}

fn read_value<L: Location + ?Sized>(location: &L, key: &str, default: &str) -> String {
    location
        .search()
        .and_then(|search| get_param(&search, key))
        .unwrap_or_else(|| default.to_string())
}

/// Decides when a settled value should be committed onward.
///
/// User-sourced values commit once per distinct value. Values arriving from
/// history navigation (or the initial load) never commit; they only become the
/// baseline later user values are compared against.
#[derive(Debug, Clone, Default)]
pub struct CommitGate<T> {
    committed: Option<T>,
}

impl<T: Clone + PartialEq> CommitGate<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { committed: None }
    }

    /// Start from an already-committed baseline.
    #[must_use]
    pub fn with_baseline(value: T) -> Self {
        Self {
            committed: Some(value),
        }
    }

    /// Observe a settled value. Returns `true` when the commit callback
    /// should fire.
    pub fn observe(&mut self, value: &T, source: UpdateSource) -> bool {
        if self.committed.as_ref() == Some(value) {
            return false;
        }
        self.committed = Some(value.clone());
        source == UpdateSource::User
    }

    /// Observe a settled value and invoke `commit` when it should fire.
    pub fn observe_with(&mut self, value: &T, source: UpdateSource, commit: impl FnOnce(&T)) {
        if self.observe(value, source) {
            commit(value);
        }
    }

    #[must_use]
    pub fn committed(&self) -> Option<&T> {
        self.committed.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Detached, MemoryHistory};

    #[test]
    fn initial_read_uses_location_then_default() {
        let history = MemoryHistory::new("?q=octo");
        let query = UrlParam::read(&history, "q", "");
        assert_eq!(query.value(), "octo");
        assert_eq!(query.source(), UpdateSource::Initial);

        let expanded = UrlParam::read(&history, "expanded", "none");
        assert_eq!(expanded.value(), "none");
    }

    #[test]
    fn detached_location_keeps_state_in_memory() {
        let mut location = Detached;
        let mut query = UrlParam::read(&location, "q", "fallback");
        assert_eq!(query.value(), "fallback");

        query.write(&mut location, Some("octo"), HistoryMode::Push);
        assert_eq!(query.value(), "octo");
        assert_eq!(query.source(), UpdateSource::User);
    }

    #[test]
    fn push_and_replace_shape_the_history() {
        let mut history = MemoryHistory::new("");
        let mut query = UrlParam::read(&history, "q", "");

        query.write(&mut history, Some("a"), HistoryMode::Replace);
        assert_eq!(history.len(), 1);
        query.write(&mut history, Some("b"), HistoryMode::Push);
        assert_eq!(history.len(), 2);
        assert_eq!(history.href(), "?q=b");
    }

    #[test]
    fn empty_writes_remove_the_key() {
        let mut history = MemoryHistory::new("?q=octo&expanded=octocat");
        let mut expanded = UrlParam::read(&history, "expanded", "");

        expanded.write(&mut history, Some(""), HistoryMode::Replace);
        assert_eq!(history.href(), "?q=octo");
        assert_eq!(expanded.value(), "");

        let mut query = UrlParam::read(&history, "q", "");
        query.write(&mut history, None, HistoryMode::Replace);
        assert_eq!(history.href(), "");
    }

    #[test]
    fn history_traversal_tags_the_change() {
        let mut history = MemoryHistory::new("");
        let mut query = UrlParam::read(&history, "q", "");
        query.write(&mut history, Some("octo"), HistoryMode::Push);

        assert!(history.back());
        assert!(query.sync_from_history(&history));
        assert_eq!(query.value(), "");
        assert_eq!(query.source(), UpdateSource::History);
    }

    #[test]
    fn history_values_never_commit() {
        let mut gate = CommitGate::new();
        let mut commits = Vec::new();

        gate.observe_with(&"octo".to_string(), UpdateSource::History, |value| {
            commits.push(value.clone())
        });
        gate.observe_with(&"oct".to_string(), UpdateSource::History, |value| {
            commits.push(value.clone())
        });

        assert!(commits.is_empty());
    }

    #[test]
    fn user_values_commit_once_per_distinct_value() {
        let mut gate = CommitGate::new();
        let mut commits = Vec::new();

        for value in ["octo", "octo", "octocat", "octocat", "octo"] {
            gate.observe_with(&value.to_string(), UpdateSource::User, |value| {
                commits.push(value.clone())
            });
        }

        assert_eq!(commits, vec!["octo", "octocat", "octo"]);
    }

    #[test]
    fn history_baseline_suppresses_an_identical_user_commit() {
        let mut gate = CommitGate::with_baseline(String::new());
        assert!(!gate.observe(&"octo".to_string(), UpdateSource::History));
        assert!(!gate.observe(&"octo".to_string(), UpdateSource::User));
        assert!(gate.observe(&"octocat".to_string(), UpdateSource::User));
        assert_eq!(gate.committed().map(String::as_str), Some("octocat"));
    }
}
