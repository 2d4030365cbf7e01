use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Request};
use url::Url;

use crate::error::DirectoryError;
use crate::models::{Repository, SearchUsersResponse, UserCandidate};
use crate::response::handle_response;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("ghfind/", env!("CARGO_PKG_VERSION"));

/// Default bound on a whole request, from connect to the last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Upper bound on the number of accounts requested per search.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// The build flavour a credential is resolved for.
///
/// Credentials are a development convenience for lifting the anonymous rate
/// limit; production builds never send one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Development,
    Production,
}

impl BuildProfile {
    /// Profile of the running binary, derived from `debug_assertions`.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Bearer token attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Resolve a configured token for the given profile.
    ///
    /// Blank tokens and any token under [`BuildProfile::Production`] resolve
    /// to `None`.
    #[must_use]
    pub fn for_profile(profile: BuildProfile, token: Option<&str>) -> Option<Self> {
        match profile {
            BuildProfile::Production => None,
            BuildProfile::Development => token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| Self(token.to_string())),
        }
    }

    fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Options used to construct a [`DirectoryClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub credential: Option<Credential>,
    /// Requests that take longer fail as [`DirectoryError::Network`].
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Operations the rest of the application needs from the directory service.
pub trait Directory: Send + Sync + 'static {
    /// Search accounts by a free-text fragment.
    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<UserCandidate>, DirectoryError>> + Send;

    /// Fetch one 1-based page of a user's public repositories, most recently
    /// updated first.
    fn user_repos(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<Repository>, DirectoryError>> + Send;
}

/// HTTP implementation of [`Directory`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: Url,
    credential: Option<Credential>,
}

impl DirectoryClient {
    pub fn new(options: ClientOptions) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(&options.base_url).map_err(|err| {
            DirectoryError::InvalidRequest(format!("base url '{}': {err}", options.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidRequest(format!(
                "base url '{}' cannot carry a path",
                options.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(options.user_agent)
            .default_headers(headers)
            .timeout(options.timeout)
            .build()
            .map_err(DirectoryError::Network)?;

        Ok(Self {
            http,
            base_url,
            credential: options.credential,
        })
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Build the search request, or `None` when the query is blank.
    pub fn search_request(&self, query: &str) -> Result<Option<Request>, DirectoryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut url = self.endpoint(&["search", "users"])?;
        url.query_pairs_mut()
            .append_pair("q", trimmed)
            .append_pair("per_page", &SEARCH_RESULT_LIMIT.to_string());

        self.build(url).map(Some)
    }

    /// Build the repository listing request, or `None` when the username is
    /// blank.
    pub fn repos_request(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Option<Request>, DirectoryError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut url = self.endpoint(&["users", trimmed, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("direction", "desc")
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &page_size.to_string());

        self.build(url).map(Some)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::InvalidRequest("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn build(&self, url: Url) -> Result<Request, DirectoryError> {
        let mut builder = self.http.get(url);
        if let Some(credential) = &self.credential {
            builder = builder.bearer_auth(credential.secret());
        }
        builder.build().map_err(DirectoryError::Network)
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, DirectoryError> {
        tracing::debug!(url = %request.url(), "directory request");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(DirectoryError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(DirectoryError::Network)?;
        handle_response(status, &body)
    }
}

impl Directory for DirectoryClient {
    async fn search_users(&self, query: &str) -> Result<Vec<UserCandidate>, DirectoryError> {
        let Some(request) = self.search_request(query)? else {
            return Ok(Vec::new());
        };
        let response: SearchUsersResponse = self.execute(request).await?;
        Ok(response.items)
    }

    async fn user_repos(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Repository>, DirectoryError> {
        let Some(request) = self.repos_request(username, page, page_size)? else {
            return Ok(Vec::new());
        };
        self.execute(request).await
    }
}
