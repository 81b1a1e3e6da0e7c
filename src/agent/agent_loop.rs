//! Agent Loop
//!
//! Drives a conversation between the user, the completion service and the
//! registered tools:
//!
//! ```text
//! INIT -> AWAITING_MODEL -> (HANDLING_TOOL_CALLS -> AWAITING_MODEL)* -> DONE
//! ```
//!
//! A run is a lazy stream of [`TurnResult`]s. Each model response is yielded
//! before its tool calls are dispatched, and the batch of tool outcomes is
//! yielded once every call of the turn has been handled. Dropping the stream
//! stops the run; whatever was already appended to history stays there.

use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{Stream, TryStreamExt};

use super::config::AgentConfig;
use super::dispatcher::ToolDispatcher;
use crate::conversation::ConversationHistory;
use crate::core::{AgentError, AgentResult, AgentState, RunPhase, SystemPromptError, TurnResult};
use crate::llm::{CompletionService, Message, ToolDefinition};
use crate::tools::{AgentEndTaskTool, Tool, ToolRegistry};

/// Lazy, finite stream of turn results from one run
pub type TurnStream<'a> = Pin<Box<dyn Stream<Item = AgentResult<TurnResult>> + Send + 'a>>;

/// Agent that alternates between the model and its tools
///
/// # Example
///
/// ```ignore
/// let llm = Arc::new(OpenAiProvider::from_env()?);
/// let mut agent = Agent::with_tools(
///     llm,
///     AgentConfig::default(),
///     vec![Arc::new(AgentEndTaskTool::new()) as Arc<dyn Tool>],
/// )?;
///
/// let mut turns = agent.run("Hi!");
/// while let Some(turn) = turns.next().await {
///     println!("{:?}", turn?);
/// }
/// ```
pub struct Agent {
    completion: Arc<dyn CompletionService>,
    config: AgentConfig,
    state: AgentState,
}

impl Agent {
    /// Create an agent with the default config and the end task tool
    pub fn new(completion: Arc<dyn CompletionService>) -> AgentResult<Self> {
        Self::with_tools(
            completion,
            AgentConfig::default(),
            vec![Arc::new(AgentEndTaskTool::new()) as Arc<dyn Tool>],
        )
    }

    /// Create an agent, compiling and registering `tools`
    ///
    /// Fails if any tool's signature is incomplete or two tools share a name.
    pub fn with_tools(
        completion: Arc<dyn CompletionService>,
        config: AgentConfig,
        tools: impl IntoIterator<Item = Arc<dyn Tool>>,
    ) -> AgentResult<Self> {
        let mut registry = ToolRegistry::new();
        for tool in tools {
            registry.register_arc(tool)?;
        }
        Ok(Self::from_registry(completion, config, registry))
    }

    /// Create an agent from an already populated registry
    pub fn from_registry(
        completion: Arc<dyn CompletionService>,
        config: AgentConfig,
        tools: ToolRegistry,
    ) -> Self {
        tracing::info!(
            "[Agent] Creating agent with provider '{}' (model: {}), tools: {:?}",
            completion.provider_name(),
            completion.model(),
            tools.tool_names()
        );

        let state = AgentState::new(tools, config.system_prompt.as_deref());

        Self {
            completion,
            config,
            state,
        }
    }

    /// The active system prompt, if any
    pub fn system_prompt(&self) -> Option<&str> {
        self.config.system_prompt.as_deref()
    }

    /// Configure a system prompt on an agent created without one
    ///
    /// Only allowed before anything was appended to history. Once a prompt is
    /// set it can never be replaced.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) -> AgentResult<()> {
        if self.config.system_prompt.is_some() {
            tracing::warn!("[Agent] Rejected attempt to replace the system prompt");
            return Err(SystemPromptError::AlreadySet.into());
        }

        let history_len = self.state.history().len();
        if history_len > 0 {
            return Err(SystemPromptError::HistoryNotEmpty(history_len).into());
        }

        let prompt = prompt.into();
        self.state.seed_system_prompt(&prompt);
        self.config.system_prompt = Some(prompt);
        Ok(())
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read view of the conversation so far
    pub fn history(&self) -> &ConversationHistory {
        self.state.history()
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.state.tools()
    }

    /// Descriptors sent to the completion service, in registration order
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.state.tools().definitions()
    }

    pub fn step_index(&self) -> usize {
        self.state.step_index()
    }

    pub fn should_continue(&self) -> bool {
        self.state.should_continue()
    }

    /// Forget the conversation, keeping only the system prompt
    pub fn reset(&mut self) {
        tracing::info!("[Agent] Resetting conversation");
        self.state.reset(self.config.system_prompt.as_deref());
    }

    /// Run the agent on one user message
    ///
    /// Returns the run's turn results as a stream. Errors from the completion
    /// service or from a tool end the stream after being yielded.
    pub fn run(&mut self, user_input: impl Into<String>) -> TurnStream<'_> {
        let user_input = user_input.into();

        let stream = async_stream::try_stream! {
            let max_steps = self.config.max_steps;

            tracing::info!("[Agent] Starting run: {}", user_input);
            self.state.begin_run(Message::user(user_input));

            while self.state.phase() == RunPhase::AwaitingModel {
                let definitions = self.state.tools().definitions();

                tracing::info!(
                    "[Agent] Calling model with {} messages (step {})",
                    self.state.history().len(),
                    self.state.step_index()
                );

                let response = self
                    .completion
                    .complete(self.state.history().messages(), &definitions)
                    .await
                    .map_err(AgentError::Completion);
                let response = self.abort_on_error(response)?;

                let calls = self.state.record_response(response.clone());
                yield TurnResult::Response(response);

                if calls.is_empty() {
                    tracing::info!("[Agent] No tool calls, run complete");
                    break;
                }

                tracing::info!("[Agent] Handling {} tool call(s)", calls.len());

                let mut outcomes = Vec::with_capacity(calls.len());
                for call in &calls {
                    let dispatched =
                        ToolDispatcher::dispatch_outcome(self.state.tools(), call).await;
                    let (outcome, ends_task) = self.abort_on_error(dispatched)?;

                    if ends_task {
                        tracing::info!("[Agent] Tool '{}' ended the task", outcome.tool_name);
                    }
                    self.state.record_tool_outcome(&outcome, ends_task);
                    outcomes.push(outcome);
                }

                let next = self.state.finish_turn(max_steps);
                if next.is_terminal() && self.state.should_continue() {
                    tracing::warn!("[Agent] Max steps ({}) reached", max_steps);
                }

                yield TurnResult::ToolOutcomes(outcomes);
            }

            tracing::info!(
                "[Agent] Run finished after {} step(s), history has {} messages",
                self.state.step_index(),
                self.state.history().len()
            );
        };

        Box::pin(stream)
    }

    /// Run the agent to completion and collect every turn result
    pub async fn run_to_completion(
        &mut self,
        user_input: impl Into<String>,
    ) -> AgentResult<Vec<TurnResult>> {
        self.run(user_input).try_collect().await
    }

    fn abort_on_error<T>(&mut self, result: AgentResult<T>) -> AgentResult<T> {
        if let Err(e) = &result {
            tracing::error!("[Agent] Run aborted: {}", e);
            self.state.abort();
        }
        result
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("provider", &self.completion.provider_name())
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}
