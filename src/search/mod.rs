//! Search-as-you-type over the user directory.

mod commands;
mod orchestrator;
mod outcome;

pub use commands::{SearchRequest, SearchResult};
pub use orchestrator::{SearchOrchestrator, SearchPhase};
pub use outcome::{SearchOutcome, SearchSelection};

/// Maximum number of candidates shown for a query.
pub const MAX_VISIBLE_USERS: usize = 5;

/// Shown when a generic search failure carries no message.
pub const SEARCH_FAILURE_FALLBACK: &str = "Something went wrong.";
