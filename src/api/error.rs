use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries nothing readable.
pub const DEFAULT_SERVER_MESSAGE: &str = "An unexpected error occurred";

/// Errors returned by [`super::GenerationApi`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request was sent but no response came back (connect failure,
    /// timeout, reset).
    #[error("No response received from the server: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The HTTP client or request URL could not be built.
    #[error("Invalid request setup: {0}")]
    Setup(String),
}

/// Extract a human-readable message from a failed response body.
///
/// Accepts `{"error": "..."}`, a JSON string, or plain text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(String::from),
        Ok(Value::String(msg)) if !msg.is_empty() => Some(msg),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
