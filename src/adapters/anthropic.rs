use crate::core::{ConfigProvider, LanguageModel};
use crate::utils::error::{OutreachError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AnthropicSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            base_url: config.api_base_url().to_string(),
            model: config.model().to_string(),
            max_tokens: config.max_tokens(),
            temperature: 0.0,
        }
    }
}

/// Anthropic Messages API client: one user turn in, first text block out.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    settings: AnthropicSettings,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_key: String, settings: AnthropicSettings) -> Self {
        Self {
            client: Client::new(),
            api_key,
            settings,
        }
    }

    fn messages_url(&self) -> String {
        if self.settings.base_url.ends_with('/') {
            format!("{}v1/messages", self.settings.base_url)
        } else {
            format!("{}/v1/messages", self.settings.base_url)
        }
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let url = self.messages_url();
        tracing::debug!("POST {} (model: {})", url, self.settings.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(OutreachError::ApiStatusError {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| OutreachError::ResponseFormatError {
                    message: format!("failed to decode response body: {}", e),
                })?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| OutreachError::ResponseFormatError {
                message: "response contained no text block".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn settings(base_url: String) -> AnthropicSettings {
        AnthropicSettings {
            base_url,
            model: "claude-3-haiku-20240307".to_string(),
            max_tokens: 2000,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "test-key")
                .header("anthropic-version", ANTHROPIC_VERSION)
                .body_contains("\"model\":\"claude-3-haiku-20240307\"")
                .body_contains("\"max_tokens\":2000")
                .body_contains("\"role\":\"user\"")
                .body_contains("Is the sky blue?");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "msg_01",
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "text", "text": "Yes"}],
                    "stop_reason": "end_turn"
                }));
        });

        let client = AnthropicClient::new("test-key".to_string(), settings(server.base_url()));
        let text = client.complete("Is the sky blue?").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "Yes");
    }

    #[tokio::test]
    async fn test_trailing_slash_base_url() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .json_body(serde_json::json!({"content": [{"type": "text", "text": "ok"}]}));
        });

        let client = AnthropicClient::new(
            "test-key".to_string(),
            settings(format!("{}/", server.base_url())),
        );
        assert_eq!(client.complete("ping").await.unwrap(), "ok");
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(401).body("invalid x-api-key");
        });

        let client = AnthropicClient::new("bad-key".to_string(), settings(server.base_url()));
        let err = client.complete("hello").await.unwrap_err();

        api_mock.assert();
        match err {
            OutreachError::ApiStatusError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid x-api-key");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_text_block_is_format_error() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .json_body(serde_json::json!({"content": []}));
        });

        let client = AnthropicClient::new("test-key".to_string(), settings(server.base_url()));
        let err = client.complete("hello").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, OutreachError::ResponseFormatError { .. }));
    }
}
