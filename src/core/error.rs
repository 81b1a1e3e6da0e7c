//! Agent error types

use thiserror::Error;

/// Errors raised while compiling a tool signature into a parameter schema
///
/// These surface when a tool is registered, never when it is called.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// One or more parameters were declared without a type
    #[error(
        "execute of tool '{tool}' must have type annotations for all parameters. Missing: [{}]",
        params.join(", ")
    )]
    MissingParameterTypes { tool: String, params: Vec<String> },

    /// The result type was not declared
    #[error("execute of tool '{tool}' must have a return type annotation")]
    MissingReturnType { tool: String },
}

/// Reasons a system prompt cannot be assigned
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemPromptError {
    /// A system prompt is already configured for this agent
    #[error("system prompt is already set and cannot be changed")]
    AlreadySet,

    /// Conversation already started without a system prompt
    #[error("system prompt must be the first message, but history already has {0} messages")]
    HistoryNotEmpty(usize),
}

/// Errors that can occur while building or running an agent
#[derive(Error, Debug)]
pub enum AgentError {
    /// Tool signature could not be compiled
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Attempt to change the system prompt
    #[error("System prompt error: {0}")]
    SystemPrompt(#[from] SystemPromptError),

    /// Two tools registered under the same name
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// Model asked for a tool nobody registered
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    /// Tool call arguments were neither a JSON object nor an encoded JSON object
    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The tool body itself failed
    #[error("Tool '{tool}' failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    /// The completion service call failed
    #[error("Completion service error: {0}")]
    Completion(#[source] anyhow::Error),
}

impl AgentError {
    /// Create a tool execution error
    pub fn tool_execution(tool: impl Into<String>, source: anyhow::Error) -> Self {
        AgentError::ToolExecution {
            tool: tool.into(),
            source,
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        AgentError::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
