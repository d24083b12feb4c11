//! Generation server collaborator.
//!
//! The controller only sees [`GenerationApi`]; [`HttpApiClient`] is the
//! production implementation talking to `/api/ask` and `/api/models`.

mod client;
mod error;

pub use client::HttpApiClient;
pub use error::{extract_error_message, ApiError, DEFAULT_SERVER_MESSAGE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SecureString;
use crate::provider::{DiagramTemplate, Provider};

/// Body of `POST /api/ask`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input: String,
    pub selected_template: DiagramTemplate,
    pub provider: Provider,
    pub model: String,
    /// Sent as an empty string when the provider needs no key.
    pub api_key: SecureString,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Successful `POST /api/ask` body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerationResponse {
    /// Diagram source, if the server returned a non-empty one.
    pub fn diagram_source(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Entry of the `GET /api/models` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub value: String,
    pub label: String,
}

impl ModelOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Server-side collaborator for model listing and diagram generation.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// `GET /api/models?provider=<id>`.
    async fn list_models(&self, provider: Provider) -> Result<Vec<ModelOption>, ApiError>;

    /// `POST /api/ask`.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError>;
}
