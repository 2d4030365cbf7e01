//! Display model for failed requests.

use ghfind_directory::DirectoryError;

/// Headline of the dedicated rate-limit notice.
pub const RATE_LIMIT_HEADLINE: &str = "GitHub rate limit reached";

/// Body of the rate-limit notice when no detail is available.
pub const RATE_LIMIT_DEFAULT_DETAIL: &str = "We have hit the hourly limit for anonymous requests.";

/// A request failure captured at a component boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: Option<String>,
    rate_limited: bool,
}

impl Failure {
    /// A failure known only by its message; a message mentioning
    /// "rate limit" marks it as rate limited.
    #[must_use]
    pub fn new(message: Option<String>) -> Self {
        let rate_limited = message
            .as_deref()
            .is_some_and(|message| message.to_lowercase().contains("rate limit"));
        Self {
            message,
            rate_limited,
        }
    }

    /// Capture a client error. Only [`DirectoryError::RateLimited`] counts as
    /// rate limited, whatever the other messages say.
    #[must_use]
    pub fn from_error(err: &DirectoryError) -> Self {
        Self {
            message: Some(err.to_string()),
            rate_limited: err.is_rate_limited(),
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limited
    }

    /// Build the notice shown for this failure. `fallback` is used when a
    /// generic failure carries no message.
    #[must_use]
    pub fn notice(&self, fallback: &str) -> Notice {
        if self.is_rate_limited() {
            return Notice::RateLimit {
                headline: RATE_LIMIT_HEADLINE,
                detail: self
                    .message
                    .clone()
                    .unwrap_or_else(|| RATE_LIMIT_DEFAULT_DETAIL.to_string()),
            };
        }

        Notice::Inline(
            self.message
                .clone()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        )
    }
}

/// How a failure is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Dedicated, non-fatal advisory for an exhausted quota.
    RateLimit {
        headline: &'static str,
        detail: String,
    },
    /// Plain inline error text.
    Inline(String),
}
