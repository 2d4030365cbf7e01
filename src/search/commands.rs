use ghfind_directory::{DirectoryError, UserCandidate};

/// A user search the orchestrator wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Identifier that lets the orchestrator correlate the response with the
    /// query that produced it.
    pub id: u64,
    /// Trimmed, non-empty query text.
    pub query: String,
}

/// Completion of a [`SearchRequest`].
#[derive(Debug)]
pub struct SearchResult {
    /// Identifier of the [`SearchRequest`] that produced the result.
    pub id: u64,
    pub outcome: Result<Vec<UserCandidate>, DirectoryError>,
}
