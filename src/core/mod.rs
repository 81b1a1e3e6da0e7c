//! Core types for the agent
//!
//! This module provides the fundamental types used throughout the crate:
//! - `AgentState` / `RunPhase` - State threaded through an agent run
//! - `TurnResult` / `ToolOutcome` - Observable output of a run
//! - `AgentError` / `SchemaError` / `SystemPromptError` - Error types

pub mod error;
pub mod output;
pub mod state;

pub use error::{AgentError, AgentResult, SchemaError, SystemPromptError};
pub use output::{ToolOutcome, TurnResult};
pub use state::{AgentState, RunPhase};
