use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use std::time::{Duration, Instant};

use crate::config::ApiConfig;
use crate::provider::Provider;

use super::error::{extract_error_message, ApiError, DEFAULT_SERVER_MESSAGE};
use super::{GenerationApi, GenerationRequest, GenerationResponse, ModelOption};

/// `reqwest` client for the generation server.
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| ApiError::Setup(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn models_url(&self, provider: Provider) -> Result<Url, ApiError> {
        Url::parse_with_params(
            &format!("{}/api/models", self.base_url),
            &[("provider", provider.id())],
        )
        .map_err(|e| ApiError::Setup(format!("Invalid models URL: {}", e)))
    }

    fn ask_url(&self) -> String {
        format!("{}/api/ask", self.base_url)
    }
}

/// Turn a non-2xx response into [`ApiError::Server`].
async fn server_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message =
        extract_error_message(&body).unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string());

    tracing::warn!(status, message = %message, "Server rejected request");
    ApiError::Server { status, message }
}

#[async_trait]
impl GenerationApi for HttpApiClient {
    async fn list_models(&self, provider: Provider) -> Result<Vec<ModelOption>, ApiError> {
        let url = self.models_url(provider)?;
        tracing::debug!(url = %url, provider = %provider, "Fetching model list");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let models: Vec<ModelOption> = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("Invalid model list: {}", e)))?;

        tracing::debug!(provider = %provider, count = models.len(), "Model list received");
        Ok(models)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError> {
        let url = self.ask_url();
        tracing::debug!(
            url = %url,
            provider = %request.provider,
            model = %request.model,
            template = %request.selected_template,
            "Sending generation request"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let latency_ms = start.elapsed().as_millis() as u64;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let parsed: GenerationResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("Invalid generation response: {}", e)))?;

        tracing::info!(
            latency_ms,
            source_len = parsed.text.as_deref().map_or(0, str::len),
            "Generation response received"
        );
        Ok(parsed)
    }
}
