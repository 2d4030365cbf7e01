//! Client for the slice of the GitHub REST API that `ghfind` consumes.
//!
//! Two endpoints are covered: user search and the per-user repository
//! listing. Responses are normalized into typed models or a classified
//! [`DirectoryError`] so callers never need to inspect raw HTTP responses.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

pub use client::{
    BuildProfile, ClientOptions, Credential, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
    Directory, DirectoryClient, SEARCH_RESULT_LIMIT,
};
pub use error::{DirectoryError, RATE_LIMIT_MESSAGE};
pub use models::{Repository, SearchUsersResponse, UserCandidate};
pub use response::handle_response;
