pub mod core;
pub mod conversation;
pub mod schema;
pub mod tools;

// Completion service seam and adapters
pub mod llm;

// Agent loop and dispatcher
pub mod agent;

pub use crate::agent::{Agent, AgentConfig, ToolDispatcher, TurnStream};
pub use crate::core::{AgentError, AgentResult, AgentState, RunPhase, ToolOutcome, TurnResult};
pub use crate::tools::{CompiledTool, Tool, ToolArgs, ToolRegistry};
