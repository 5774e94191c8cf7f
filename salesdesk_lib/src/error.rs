//! Error types for the library layer.

use std::fmt;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization, configuration, and input validation failures.
#[derive(Debug)]
pub enum DashboardError {
    /// An error from the underlying API client.
    Api(salesdesk_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// The configuration file or environment could not be used.
    Config(String),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl DashboardError {
    /// The text shown in the error notification.
    ///
    /// Backend-reported messages are passed through verbatim; transport and
    /// parse failures get [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e
                .backend_message()
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
            Self::InvalidInput(msg) | Self::Config(msg) => msg.clone(),
            Self::Serialization(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<salesdesk_api::Error> for DashboardError {
    fn from(e: salesdesk_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
