//! Tool system — host capabilities the model may invoke.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, VitalsError};
use crate::message::{ChatMessage, ToolCall};
use crate::provider::ToolDefinition;

/// Abstract tool trait — implement this to expose a new host probe.
///
/// # Example
///
/// ```rust,ignore
/// struct UptimeTool;
///
/// #[async_trait]
/// impl Tool for UptimeTool {
///     fn name(&self) -> &str { "get_uptime" }
///     fn description(&self) -> &str { "Get host uptime" }
///     fn parameters(&self) -> Value {
///         serde_json::json!({ "type": "object", "properties": {} })
///     }
///
///     async fn execute(&self, _args: Value) -> Result<String> {
///         Ok("up 3 days".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name used in function calls.
    fn name(&self) -> &str;

    /// Description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for tool parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with given arguments.
    async fn execute(&self, args: Value) -> Result<String>;

    /// Convert to a tool declaration for the chat request.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            r#type: "function".to_string(),
            function: crate::provider::FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters(),
            },
        }
    }
}

/// Fixed registry of tools, kept in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a new tool. A tool with the same name replaces the old one.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        tracing::debug!("Registered tool: {}", name);
        match self.tools.iter().position(|t| t.name() == name) {
            Some(idx) => self.tools[idx] = Box::new(tool),
            None => self.tools.push(Box::new(tool)),
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Tool declarations advertised to the model, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> Result<String> {
        let Some(tool) = self.get(name) else {
            tracing::warn!("no such func: {}", name);
            return Err(VitalsError::NoSuchFunc(name.to_string()));
        };

        tracing::info!("Executing tool: {} with args: {}", name, args);

        match tool.execute(args).await {
            Ok(result) => {
                tracing::debug!("Tool {} completed ({} bytes)", name, result.len());
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Tool {} failed: {}", name, e);
                Err(e)
            }
        }
    }

    /// Run every call in order and append one tool-role message per call.
    ///
    /// The first unknown name or failing tool aborts the whole batch; the
    /// log is consumed, so no partial result escapes.
    pub async fn dispatch(
        &self,
        mut messages: Vec<ChatMessage>,
        calls: &[ToolCall],
    ) -> Result<Vec<ChatMessage>> {
        for call in calls {
            let output = self
                .execute(&call.function.name, call.function.arguments.clone())
                .await?;
            messages.push(ChatMessage::tool_result(call, &output));
        }
        Ok(messages)
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
