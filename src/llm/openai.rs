//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint implementing `POST {base}/chat/completions` with
//! function calling.

use std::env;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::CompletionService;
use super::types::{Message, ToolArguments, ToolDefinition};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

/// Copy of `messages` with every tool call's arguments as JSON text
///
/// Chat completions only accepts string arguments on assistant tool calls.
fn wire_messages(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .cloned()
        .map(|mut message| {
            if let Some(calls) = message.tool_calls.as_mut() {
                for call in calls.iter_mut() {
                    let text = call.function.arguments.encoded();
                    call.function.arguments = ToolArguments::Encoded(text);
                }
            }
            message
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Message,
}

/// OpenAI-compatible LLM provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiProvider {
    /// Create a new provider from environment variables
    ///
    /// Reads from:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_MODEL` (optional, defaults to `gpt-4.1-mini`)
    /// - `OPENAI_BASE_URL` (optional, defaults to the public API)
    pub fn from_env() -> Result<Self> {
        tracing::info!("[OpenAI] Creating provider from environment");

        let api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base = env::var("OPENAI_BASE_URL")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        tracing::info!("[OpenAI] Using model: {}", model);
        tracing::debug!("[OpenAI] API base: {}", api_base);

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            api_base,
        })
    }

    /// Create a new provider with a specific API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait::async_trait]
impl CompletionService for OpenAiProvider {
    async fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Message> {
        let request = ChatRequest {
            model: &self.model,
            messages: wire_messages(messages),
            tools,
        };

        let request_json =
            serde_json::to_string(&request).context("Failed to serialize chat request")?;
        tracing::debug!("[OpenAI] Request JSON: {}", request_json);

        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to chat completions API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read chat completions response body")?;

        tracing::debug!("[OpenAI] Response status: {}", status);
        tracing::debug!("[OpenAI] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[OpenAI] API error: {} - {}", status, response_text);
            anyhow::bail!("Chat completions API error ({}): {}", status, response_text);
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to parse chat completions response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .context("Chat completions response had no choices")
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
