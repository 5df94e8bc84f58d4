//! Conversation driver — the two-turn health report exchange.
//!
//! 1. Seed a single user message and advertise the probe tools
//! 2. Turn 1: free-text reply, expected to carry exactly two tool calls
//! 3. Run the calls locally and append their output as tool messages
//! 4. Turn 2: no tools, reply constrained to the Health-Report Schema

use crate::error::Result;
use crate::message::{ChatMessage, ChatResponse};
use crate::provider::{ChatRequest, LlmProvider, ToolDefinition};
use crate::report::{HealthReport, health_report_schema};
use crate::tool::ToolRegistry;

/// Number of tool calls accepted on the first turn.
pub const EXPECTED_TOOL_CALLS: usize = 2;

/// Configuration for a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Seed user message.
    pub prompt: String,
    /// Append the turn-1 assistant message before the tool results.
    pub keep_assistant_turn: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: crate::config::DEFAULT_MODEL.to_string(),
            prompt: crate::config::DEFAULT_PROMPT.to_string(),
            keep_assistant_turn: false,
        }
    }
}

/// How a run ended when no error was raised.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Content of the formatted second turn, unvalidated.
    Report(String),
    /// Turn 1 produced no tool calls.
    NoToolCalls,
    /// Turn 1 produced a call count other than [`EXPECTED_TOOL_CALLS`].
    UnexpectedToolCalls(usize),
}

/// The health agent — ties together provider and tools.
pub struct HealthAgent {
    pub config: AgentConfig,
    pub tools: ToolRegistry,
}

impl HealthAgent {
    pub fn new(config: AgentConfig, tools: ToolRegistry) -> Self {
        Self { config, tools }
    }

    /// Seed message log and tool declarations for the first turn.
    pub fn seed(&self) -> (Vec<ChatMessage>, Vec<ToolDefinition>) {
        (
            vec![ChatMessage::user(&self.config.prompt)],
            self.tools.definitions(),
        )
    }

    /// Issue one non-streamed chat call.
    ///
    /// `formatted` constrains the reply to the Health-Report Schema.
    pub async fn chat(
        &self,
        provider: &dyn LlmProvider,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        formatted: bool,
    ) -> Result<ChatResponse> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            format: formatted.then(health_report_schema),
        };

        let response = provider.chat(request).await?;

        tracing::debug!(
            "LLM response: done_reason={:?}, tool_calls={}, eval_count={:?}",
            response.done_reason,
            response.message.calls().len(),
            response.eval_count,
        );

        Ok(response)
    }

    /// Run both turns and return the final formatted content.
    pub async fn run(&self, provider: &dyn LlmProvider) -> Result<Outcome> {
        let (mut messages, tools) = self.seed();
        tracing::debug!("Advertising tools: {:?}", self.tools.names());

        let first = self.chat(provider, &messages, &tools, false).await?;
        if !first.has_tool_calls() {
            tracing::warn!("no calls got. try again");
            return Ok(Outcome::NoToolCalls);
        }

        let calls = first.message.calls();

        if calls.len() != EXPECTED_TOOL_CALLS {
            tracing::warn!("too few calls. try again");
            return Ok(Outcome::UnexpectedToolCalls(calls.len()));
        }

        if self.config.keep_assistant_turn {
            messages.push(first.message.clone());
        }

        let messages = self.tools.dispatch(messages, calls).await?;

        let last = self.chat(provider, &messages, &[], true).await?;
        let content = last.message.content;

        if let Err(e) = HealthReport::parse(&content) {
            tracing::warn!("Reply does not match the health report schema: {}", e);
        }

        tracing::info!("Health report received ({} chars)", content.len());

        Ok(Outcome::Report(content))
    }
}
