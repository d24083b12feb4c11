//! User-facing error taxonomy.
//!
//! Every failure the controller can hit ends up as one [`ClientError`], and
//! every [`ClientError`] knows how it is presented as a toast.

use thiserror::Error;

use crate::api::ApiError;
use crate::ui::toast::ToastKind;

/// Server phrasings that mean the provider key was rejected.
const INVALID_KEY_PHRASES: &[&str] = &[
    "API key not valid",
    "Invalid API token",
    "Authentication failed",
];

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const NO_RESPONSE_MESSAGE: &str = "No response received from the server";
pub const NO_CHART_MESSAGE: &str = "No chart data received from the server";
pub const INVALID_KEY_MESSAGE: &str = "Invalid API key. Please check your API key and try again.";
pub const NO_SVG_MESSAGE: &str = "No SVG found to export";
pub const NO_SOURCE_MESSAGE: &str = "No diagram source to copy";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A required field is missing or out of range. Never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request sent, no response received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// 2xx response without usable diagram text.
    #[error("{}", NO_CHART_MESSAGE)]
    EmptyResult,

    /// Server error whose message says the API key was rejected.
    #[error("Invalid API key (status {status})")]
    Credential { status: u16 },

    /// The request could not be built.
    #[error("Request error: {0}")]
    Request(String),

    /// The renderer refused the diagram source.
    #[error("Render error: {0}")]
    Render(String),

    /// `/api/models` failed.
    #[error("Model list error: {0}")]
    ModelList(String),

    /// Export or copy requested with nothing to export.
    #[error("{0}")]
    ExportPrecondition(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Failed to save {file_name}: {message}")]
    Download { file_name: String, message: String },

    /// A submission is already in flight.
    #[error("A request is already in progress")]
    Busy,
}

impl ClientError {
    /// Classify a failed `/api/ask` call.
    pub fn from_generation(err: ApiError) -> Self {
        match err {
            ApiError::Transport(detail) => ClientError::Transport(detail),
            ApiError::Server { status, message } => {
                if is_invalid_key_message(&message) {
                    ClientError::Credential { status }
                } else {
                    ClientError::Server { status, message }
                }
            }
            ApiError::Decode(_) => ClientError::EmptyResult,
            ApiError::Setup(detail) => ClientError::Request(detail),
        }
    }

    /// Classify a failed `/api/models` call.
    pub fn from_model_list(err: ApiError) -> Self {
        let message = match err {
            ApiError::Transport(_) => NO_RESPONSE_MESSAGE.to_string(),
            ApiError::Server { status, message } => format!("{} (status {})", message, status),
            ApiError::Decode(detail) | ApiError::Setup(detail) => detail,
        };
        ClientError::ModelList(message)
    }

    pub fn kind(&self) -> ToastKind {
        match self {
            ClientError::ExportPrecondition(_)
            | ClientError::Clipboard(_)
            | ClientError::Download { .. } => ToastKind::Warning,
            _ => ToastKind::Error,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ClientError::Validation(_) => "Validation Error".to_string(),
            ClientError::Server { status, .. } => format!("Error {}", status),
            ClientError::Credential { .. } => "API Key Error".to_string(),
            ClientError::ModelList(_) => "Model List Error".to_string(),
            ClientError::ExportPrecondition(_)
            | ClientError::Clipboard(_)
            | ClientError::Download { .. } => "Warning".to_string(),
            ClientError::Busy => "Busy".to_string(),
            ClientError::Transport(_)
            | ClientError::EmptyResult
            | ClientError::Request(_)
            | ClientError::Render(_) => "Error".to_string(),
        }
    }

    pub fn body(&self) -> String {
        match self {
            ClientError::Validation(message)
            | ClientError::Request(message)
            | ClientError::Render(message)
            | ClientError::ModelList(message)
            | ClientError::ExportPrecondition(message)
            | ClientError::Clipboard(message) => message.clone(),
            ClientError::Transport(_) => NO_RESPONSE_MESSAGE.to_string(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::EmptyResult => NO_CHART_MESSAGE.to_string(),
            ClientError::Credential { .. } => INVALID_KEY_MESSAGE.to_string(),
            ClientError::Download { .. } | ClientError::Busy => self.to_string(),
        }
    }
}

fn is_invalid_key_message(message: &str) -> bool {
    INVALID_KEY_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}
