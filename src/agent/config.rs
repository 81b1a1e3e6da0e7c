//! Agent Configuration
//!
//! Configuration options for the Agent.

use super::system_prompt::default_system_prompt;

/// Hard cap on turns per run
pub const MAX_STEPS: usize = 20;

/// Configuration for an Agent
///
/// Use the builder pattern to configure the agent:
///
/// ```ignore
/// let config = AgentConfig::new("You are a helpful assistant")
///     .with_max_steps(10);
/// ```
#[derive(Clone)]
pub struct AgentConfig {
    /// System prompt for the LLM (none means the history starts with the user)
    pub system_prompt: Option<String>,

    /// Maximum number of turns per run (prevents infinite loops)
    pub max_steps: usize,
}

impl AgentConfig {
    /// Create a new agent configuration with a system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Some(system_prompt.into()),
            max_steps: MAX_STEPS,
        }
    }

    /// Configuration without any system prompt
    pub fn without_system_prompt() -> Self {
        Self {
            system_prompt: None,
            max_steps: MAX_STEPS,
        }
    }

    /// Lower the turn limit per run (between one and [`MAX_STEPS`])
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max.clamp(1, MAX_STEPS);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(default_system_prompt())
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field(
                "system_prompt",
                &self
                    .system_prompt
                    .as_ref()
                    .map(|p| format!("{}...", p.chars().take(50).collect::<String>())),
            )
            .field("max_steps", &self.max_steps)
            .finish()
    }
}
