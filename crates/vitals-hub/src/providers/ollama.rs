//! Ollama provider — native `/api/chat` endpoint, non-streamed.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use vitals_core::error::{Result, VitalsError};
use vitals_core::message::{ChatMessage, ChatResponse};
use vitals_core::provider::{ChatRequest, LlmProvider, ProviderConfig, ToolDefinition};

/// Chat transport for an Ollama-compatible server.
pub struct OllamaProvider {
    client: Client,
    config: ProviderConfig,
    api_url: String,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let api_url = format!("{}/api/chat", config.host.trim_end_matches('/'));

        Ok(Self {
            client: builder.build()?,
            config,
            api_url,
        })
    }

    /// Endpoint the requests are posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Internal request body.
#[derive(Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<Value>,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        info!(
            "Calling {} at {} model: {} ({} messages, {} tools, formatted={})",
            self.name(),
            self.config.host,
            request.model,
            request.messages.len(),
            request.tools.len(),
            request.format.is_some()
        );

        let body = ApiRequest {
            model: request.model,
            messages: request.messages,
            stream: false,
            tools: request.tools,
            format: request.format,
        };

        let resp = self.client.post(&self.api_url).json(&body).send().await?;

        let status = resp.status();
        let body_text = resp.text().await?;

        debug!(
            "API response status: {}, body length: {}",
            status,
            body_text.len()
        );

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiError>(&body_text) {
                return Err(VitalsError::Provider(format!(
                    "{} API error ({}): {}",
                    self.name(),
                    status,
                    err.error
                )));
            }
            return Err(VitalsError::Provider(format!(
                "{} API error ({}): {}",
                self.name(),
                status,
                preview(&body_text)
            )));
        }

        serde_json::from_str::<ChatResponse>(&body_text).map_err(|e| {
            VitalsError::Provider(format!(
                "Failed to parse response: {} — body: {}",
                e,
                preview(&body_text)
            ))
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let provider = OllamaProvider::new(ProviderConfig {
            host: "http://127.0.0.1:11434/".into(),
            timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(provider.api_url(), "http://127.0.0.1:11434/api/chat");
    }

    #[test]
    fn test_request_omits_empty_tools_and_format() {
        let body = ApiRequest {
            model: "llama3.2:3b".into(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
            tools: Vec::new(),
            format: None,
        };
        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "model": "llama3.2:3b",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false
            })
        );
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), 200);
    }
}
