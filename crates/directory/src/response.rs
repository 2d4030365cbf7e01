use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DirectoryError;

/// Turn a status code and raw body into either the decoded payload or a
/// classified [`DirectoryError`].
///
/// Successful bodies are decoded as-is. Failed responses are inspected for a
/// JSON `message` field on a best-effort basis; bodies that are not valid
/// JSON simply carry no message.
pub fn handle_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, DirectoryError> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(DirectoryError::Decode);
    }

    let message = api_message(body);

    if status == StatusCode::FORBIDDEN
        && message
            .as_deref()
            .is_some_and(|message| message.to_lowercase().contains("rate limit"))
    {
        tracing::warn!("directory rate limit reached");
        return Err(DirectoryError::RateLimited);
    }

    Err(DirectoryError::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        message,
    })
}

fn api_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
