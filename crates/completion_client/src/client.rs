//! HTTP client for OpenAI-compatible chat-completion endpoints.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::models::{
    upstream_error_message, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ModelList,
};
use crate::provider::{CompletionOptions, CompletionProvider};

const SYSTEM_MESSAGE: &str =
    "You are a helpful assistant that generates concise and engaging post excerpts.";

/// Connection parameters resolved from the settings record.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Reject incomplete configuration before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "API key is not configured. Enter a key in the connection settings.".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ProviderError::Config(
                "API base URL is not configured. Enter an endpoint in the connection settings."
                    .to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ProviderError::Config(
                "No model selected. Pick a model in the connection settings.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct HttpCompletionClient {
    client: Client,
    config: ConnectionConfig,
}

impl HttpCompletionClient {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Transport)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send_chat(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_MESSAGE),
                ChatMessage::user(prompt),
            ],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        debug!(
            "dispatching completion request: model={}, prompt_len={}",
            self.config.model,
            prompt.len()
        );

        let response = self.send_chat(&request).await?;
        response.content().ok_or(ProviderError::MissingContent)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let parsed: ModelList = serde_json::from_str(&body)?;
        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            base_url: "https://api.example.com/v1".to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn validate_rejects_missing_api_key() {
        let config = ConnectionConfig {
            api_key: "  ".to_string(),
            ..config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn validate_rejects_missing_model() {
        let config = ConnectionConfig {
            model: String::new(),
            ..config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn endpoint_joins_without_duplicate_slash() {
        let client = HttpCompletionClient::new(ConnectionConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..config()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
    }
}
