//! Location-bound UI state.
//!
//! A [`Location`] models the query string of a navigable address (a browser
//! address bar, or the in-memory [`MemoryHistory`] used by the terminal
//! front-end). [`UrlParam`] binds one query-string key to in-memory state and
//! records the provenance of every change so observers can tell user edits
//! apart from back/forward navigation.

mod memory;
mod param;
mod query_string;

pub use memory::MemoryHistory;
pub use param::{CommitGate, UrlParam};
pub use query_string::{get_param, set_param};

/// How a write is recorded in the navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Append a new navigable entry.
    Push,
    /// Rewrite the current entry in place.
    Replace,
}

/// Where the current value of a [`UrlParam`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// Read from the location before any write or navigation.
    Initial,
    /// Written by the application in response to user interaction.
    User,
    /// Re-read after back/forward navigation.
    History,
}

/// Capability to read and rewrite the query string of the current location.
pub trait Location {
    /// Current query string without the leading `?`, or `None` when no
    /// browsing context is available.
    fn search(&self) -> Option<String>;

    /// Append a new history entry carrying `search`.
    fn push(&mut self, search: String);

    /// Replace the current history entry's query string with `search`.
    fn replace(&mut self, search: String);

    /// Move `delta` entries through the history. Returns `true` when the
    /// current entry changed, which callers treat like a `popstate` event.
    fn traverse(&mut self, delta: isize) -> bool {
        let _ = delta;
        false
    }

    /// Write `search` using the requested history mode.
    fn write(&mut self, search: String, mode: HistoryMode) {
        match mode {
            HistoryMode::Push => self.push(search),
            HistoryMode::Replace => self.replace(search),
        }
    }
}

/// A [`Location`] for environments without an address bar.
///
/// Reads yield nothing and writes are discarded, so [`UrlParam`] falls back to
/// its default and keeps state purely in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Location for Detached {
    fn search(&self) -> Option<String> {
        None
    }

    fn push(&mut self, _search: String) {}

    fn replace(&mut self, _search: String) {}
}
