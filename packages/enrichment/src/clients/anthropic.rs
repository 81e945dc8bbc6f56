//! Anthropic Messages API client.
//!
//! This is the infrastructure implementation of BaseTextGenerator.
//! What to prompt for lives in the pipeline, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, Result};
use crate::traits::BaseTextGenerator;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used when the caller does not override it.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic implementation of text generation.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    api_url: String,
    default_model: String,
    max_tokens: u32,
}

// Request/Response types for the Messages API

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| EnrichmentError::Http(Box::new(e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: ANTHROPIC_API_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            EnrichmentError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "ANTHROPIC_API_KEY environment variable not set",
            )))
        })?;
        Self::new(api_key)
    }

    /// Override the default model.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the API URL (for local stubs).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// The model used when no per-call override is given.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn generation_error(message: impl Into<String>) -> EnrichmentError {
        EnrichmentError::Generation(Box::new(std::io::Error::other(message.into())))
    }
}

#[async_trait]
impl BaseTextGenerator for AnthropicClient {
    async fn generate_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let model = model.unwrap_or(&self.default_model);

        tracing::debug!(
            prompt_length = prompt.len(),
            model = model,
            "Calling Anthropic API"
        );

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| EnrichmentError::Generation(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Self::generation_error(format!(
                "Anthropic API error: {} - {}",
                status, text
            )));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::Generation(Box::new(e)))?;

        let text = body
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .ok_or_else(|| Self::generation_error("No text content in Anthropic response"))?;

        tracing::debug!(
            response_length = text.len(),
            model = model,
            "Anthropic API response received"
        );

        Ok(text)
    }
}
