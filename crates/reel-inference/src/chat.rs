//! Fireworks chat-completion backend (OpenAI-compatible API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use reel_core::{defaults, ChatBackend, ChatOptions, Error, Result};

/// Default chat endpoint.
pub const DEFAULT_CHAT_URL: &str = defaults::CHAT_BASE_URL;

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = defaults::CHAT_MODEL;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = defaults::CHAT_TIMEOUT_SECS;

/// Configuration for the Fireworks chat backend.
#[derive(Debug, Clone)]
pub struct FireworksConfig {
    /// Base URL for the OpenAI-compatible endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local stand-ins).
    pub api_key: Option<String>,
    /// Chat model slug.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHAT_URL.to_string(),
            api_key: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FireworksConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FIREWORKS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string()),
            api_key: std::env::var("FIREWORKS_API_KEY").ok(),
            model: std::env::var("FIREWORKS_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            timeout_seconds: defaults::env_parse("FIREWORKS_TIMEOUT", DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fireworks chat-completion backend.
pub struct FireworksBackend {
    client: Client,
    config: FireworksConfig,
}

impl FireworksBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: FireworksConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing chat backend: url={}, model={}",
            config.base_url, config.model
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(FireworksConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl ChatBackend for FireworksBackend {
    async fn chat(&self, system: &str, user: &str, options: ChatOptions) -> Result<String> {
        debug!(
            model = %self.config.model,
            prompt_len = user.len(),
            "Requesting chat completion"
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Chat request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Chat API returned {}: {}",
                status, body
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse chat response: {}", e)))?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(response_len = content.len(), "Chat completion received");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Wire types for the OpenAI-compatible chat API.

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
