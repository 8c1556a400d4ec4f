//! Error types for API calls.

use thiserror::Error;

/// Errors surfaced by the API client.
///
/// Every variant carries the endpoint it happened on; the rendered message
/// is what fail actions and the notice line show, so it has to stand on its
/// own without a stack trace.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached at all.
    #[error("request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{endpoint}' returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request ran past the configured deadline.
    #[error("request to '{endpoint}' timed out after {seconds}s")]
    Timeout { endpoint: String, seconds: u64 },
}

impl ApiError {
    /// HTTP status of the failure, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}

/// Pull a human-readable message out of an error response body.
///
/// The API reports failures as `{"message": "..."}`, sometimes nested under
/// an `"error"` object. Anything else falls back to the raw body, or the
/// status text when the body is empty.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let direct = value.get("message").and_then(|m| m.as_str());
        let nested = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str());
        if let Some(message) = direct.or(nested) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}
