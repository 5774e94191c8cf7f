//! Error types for the API client.

/// Body fields the backend uses to carry a human-readable error, in the
/// order they are consulted.
const MESSAGE_FIELDS: &[&str] = &["message", "error"];

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unparsable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status; `body` is the full response body.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// Returns the message the backend embedded in an error response, if any.
    ///
    /// The body is parsed as JSON and the first non-empty field from
    /// [`MESSAGE_FIELDS`] wins. Validation errors sometimes arrive as an
    /// array of strings; those are joined with `", "`.
    pub fn backend_message(&self) -> Option<String> {
        let Error::HttpStatus { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        MESSAGE_FIELDS
            .iter()
            .find_map(|field| message_from_value(value.get(field)?))
    }
}

fn message_from_value(value: &serde_json::Value) -> Option<String> {
    let message = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}
