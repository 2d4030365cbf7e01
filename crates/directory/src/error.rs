use thiserror::Error;

/// Fixed, user-facing text reported whenever GitHub rejects a request for
/// exceeding the rate limit, regardless of the server's own wording.
pub const RATE_LIMIT_MESSAGE: &str = "GitHub API rate limit exceeded. Please try again later.";

/// Failures produced while talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The remote quota is exhausted (HTTP 403 mentioning "rate limit").
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// Any other non-2xx response.
    #[error("{}", api_error_text(*status, status_text, message.as_deref()))]
    Api {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to decode GitHub response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request could not be assembled from the configured options.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl DirectoryError {
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// HTTP status code carried by the failure, when there was a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }
}

fn api_error_text(status: u16, status_text: &str, message: Option<&str>) -> String {
    let mut text = format!("GitHub API error ({status}): {status_text}");
    if let Some(message) = message.filter(|message| !message.is_empty()) {
        text.push_str(" – ");
        text.push_str(message);
    }
    text
}
