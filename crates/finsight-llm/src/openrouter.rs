//! OpenRouter chat-completions client
//!
//! See: https://openrouter.ai/docs/api-reference/chat-completion
//!
//! # Example
//!
//! ```no_run
//! use finsight_llm::openrouter::{OpenRouterClient, OpenRouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenRouterConfig::from_env()?
//!         .with_model("openai/gpt-4o-mini")
//!         .with_reasoning(true);
//!
//!     let client = OpenRouterClient::with_config(config)?;
//!     let answer = client.chat("Summarize today's market in one sentence.").await?;
//!     println!("{answer}");
//!
//!     Ok(())
//! }
//! ```

use crate::error::{LlmError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "nvidia/nemotron-3-nano-30b-a3b:free";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the OpenRouter client
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for bearer authentication
    pub api_key: String,

    /// Model identifier (default: "nvidia/nemotron-3-nano-30b-a3b:free")
    pub model: String,

    /// Base URL for the API (default: "https://openrouter.ai/api/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,

    /// Enable reasoning for models that support it (default: false)
    pub reasoning: bool,
}

impl OpenRouterConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            reasoning: false,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENROUTER_API_KEY` and, if set, the model
    /// from `OPENROUTER_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY").map_err(|_| {
            LlmError::Config("OPENROUTER_API_KEY environment variable not set".to_string())
        })?;
        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Enable or disable reasoning
    pub fn with_reasoning(mut self, enabled: bool) -> Self {
        self.reasoning = enabled;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<ReasoningOpts>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ReasoningOpts {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ChatError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatError {
    #[serde(default)]
    message: String,
}

/// OpenRouter client
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a new client with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenRouterConfig::new(api_key))
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenRouterConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    /// Send a single-message chat completion and return the model's reply
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        debug!("Sending chat completion to {}", self.config.api_base);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            reasoning: self
                .config
                .reasoning
                .then_some(ReasoningOpts { enabled: true }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimitExceeded(error_text),
                _ => LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let body: ChatResponse = serde_json::from_slice(&response.bytes().await?)?;

        // Some provider errors arrive with a 200 status
        if let Some(error) = body.error {
            return Err(LlmError::Provider(error.message));
        }

        let choice = body.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenRouterConfig::new("or-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout_secs, 60);
        assert!(!config.reasoning);
    }

    #[test]
    fn test_config_builder() {
        let config = OpenRouterConfig::new("or-key")
            .with_model("openai/gpt-4o-mini")
            .with_api_base("http://localhost:8000/v1")
            .with_timeout(30)
            .with_reasoning(true);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.api_base, "http://localhost:8000/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.reasoning);
    }

    #[test]
    fn test_client_creation() {
        let client = OpenRouterClient::new("or-key").unwrap();
        assert_eq!(client.config().api_key, "or-key");
    }

    #[test]
    fn test_request_omits_reasoning_when_disabled() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            reasoning: None,
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(!body.contains("reasoning"));

        let request = ChatRequest {
            reasoning: Some(ReasoningOpts { enabled: true }),
            ..request
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(body.contains(r#""reasoning":{"enabled":true}"#));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"content":"Steady quarter."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Steady quarter.");
        assert!(parsed.error.is_none());

        let body = r#"{"choices":[],"error":{"message":"model overloaded"}}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.unwrap().message, "model overloaded");
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_chat_live() {
        let client = OpenRouterClient::from_env().unwrap();
        let reply = client.chat("Reply with the single word: ok").await.unwrap();
        assert!(!reply.is_empty());
    }
}
