//! LLM Provider trait — the abstraction over the chat server API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::{ChatMessage, ChatResponse};

/// Tool definition in function calling format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub r#type: String,
    pub function: FunctionDefinition,
}

/// Function definition for tool calling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// One non-streamed chat request.
///
/// `tools` and `format` are never both set by the driver: the first turn
/// advertises tools, the second constrains the reply shape.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
    /// JSON Schema the reply must conform to (None = free text).
    pub format: Option<Value>,
}

/// LLM Provider trait — implement this to talk to another chat server.
///
/// # Example
///
/// ```rust,ignore
/// struct MyProvider;
///
/// #[async_trait]
/// impl LlmProvider for MyProvider {
///     fn name(&self) -> &str { "my-provider" }
///
///     async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
///         // Call your API here
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Send a chat request and wait for the final response.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Provider connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Base URL of the chat server, e.g. `http://127.0.0.1:11434`.
    pub host: String,
    /// Request timeout in seconds (None = transport default).
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout_secs: None,
        }
    }
}

pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_PORT: u16 = 11434;

/// Complete a host value the way Ollama's `OLLAMA_HOST` is read:
/// scheme defaults to `http`, trailing slashes are dropped. A missing port is
/// 11434 when no scheme was given, otherwise the scheme's own port.
pub fn normalize_host(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');
    if raw.is_empty() {
        return DEFAULT_HOST.to_string();
    }

    let (scheme, rest, explicit_scheme) = match raw.split_once("://") {
        Some((scheme, rest)) => (scheme, rest, true),
        None => ("http", raw, false),
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let has_port = match authority.rsplit_once(':') {
        // Bracketed IPv6 without a port ends in ']'.
        Some((_, port)) => !port.ends_with(']') && port.parse::<u16>().is_ok(),
        None => false,
    };

    let authority = if authority.is_empty() {
        "127.0.0.1".to_string()
    } else {
        authority.to_string()
    };

    if has_port {
        format!("{}://{}{}", scheme, authority, path)
    } else {
        let port = match (explicit_scheme, scheme) {
            (false, _) => DEFAULT_PORT,
            (true, "https") => 443,
            (true, "http") => 80,
            (true, _) => DEFAULT_PORT,
        };
        format!("{}://{}:{}{}", scheme, authority, port, path)
    }
}
