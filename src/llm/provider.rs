//! Completion service trait
//!
//! Abstracts the chat completion backend so the agent loop can run against
//! any provider (OpenAI-compatible HTTP, scripted replies in tests, etc.).

use anyhow::Result;

use super::types::{Message, ToolDefinition};

/// A chat completion backend with function calling.
///
/// Receives the full conversation plus the descriptors of every registered
/// tool and returns exactly one assistant message, which may carry tool calls.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Request the next assistant message.
    async fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Message>;

    /// Get the current model name.
    fn model(&self) -> String;

    /// Get the provider name (e.g., "openai", "scripted").
    fn provider_name(&self) -> &str;
}
