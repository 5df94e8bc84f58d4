//! Message types — the conversation log exchanged with the chat server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
            tool_calls: None,
            tool_name: None,
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
            tool_calls: None,
            tool_name: None,
        }
    }

    /// Tool-role reply that echoes the invocation it answers.
    pub fn tool_result(call: &ToolCall, output: &str) -> Self {
        Self {
            role: Role::Tool,
            content: output.to_string(),
            tool_calls: Some(vec![call.clone()]),
            tool_name: Some(call.function.name.clone()),
        }
    }

    /// Tool calls carried by this message, empty when there are none.
    pub fn calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }
}

/// A model-emitted tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn new(name: &str, arguments: Value) -> Self {
        Self {
            function: FunctionCall {
                name: name.to_string(),
                arguments,
            },
        }
    }
}

/// Function call details inside a tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// Opaque argument mapping, handed to the tool untouched.
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Default::default())
}

/// Final (non-streamed) reply from the chat server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
}

impl ChatResponse {
    /// Check if the response has tool calls.
    pub fn has_tool_calls(&self) -> bool {
        !self.message.calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_echoes_call() {
        let call = ToolCall::new("get_storage_info", json!({"path": "/"}));
        let msg = ChatMessage::tool_result(&call, "DF_OUT");

        let wire = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            wire,
            json!({
                "role": "tool",
                "content": "DF_OUT",
                "tool_calls": [{"function": {"name": "get_storage_info", "arguments": {"path": "/"}}}],
                "tool_name": "get_storage_info"
            })
        );
    }

    #[test]
    fn test_user_message_omits_optional_fields() {
        let wire = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(wire, json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_response_parses_ollama_envelope() {
        let body = json!({
            "model": "llama3.2:3b",
            "created_at": "2024-07-22T20:33:28.123648Z",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    {"function": {"name": "get_storage_info", "arguments": {}}},
                    {"function": {"name": "get_memory_info"}}
                ]
            },
            "done_reason": "stop",
            "done": true,
            "eval_count": 31
        });

        let resp: ChatResponse = serde_json::from_value(body).unwrap();
        assert!(resp.has_tool_calls());
        assert_eq!(resp.message.calls().len(), 2);
        assert_eq!(resp.message.calls()[1].function.arguments, json!({}));
        assert_eq!(resp.eval_count, Some(31));
    }

    #[test]
    fn test_response_without_calls() {
        let resp: ChatResponse =
            serde_json::from_value(json!({"message": {"role": "assistant", "content": "ok"}}))
                .unwrap();
        assert!(!resp.has_tool_calls());
        assert!(resp.message.calls().is_empty());
    }
}
