use serde::{Deserialize, Serialize};

/// A single account returned by the user search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCandidate {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Envelope returned by `GET /search/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUsersResponse {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<UserCandidate>,
}

/// A public repository as listed by `GET /users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub updated_at: String,
}
