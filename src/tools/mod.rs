//! Tool system for the agent
//!
//! This module provides:
//! - `Tool` trait - Interface for implementing tools
//! - `CompiledTool` - A tool paired with its compiled parameter schema
//! - `ToolRegistry` - Registry for managing available tools
//! - `common` - Built-in tools (end task, send message)

mod registry;
mod tool;

/// Common/built-in tools
pub mod common;

// Core exports
pub use registry::ToolRegistry;
pub use tool::{CompiledTool, Tool, ToolArgs};

// Re-export common tools for convenience
pub use common::{AgentEndTaskTool, SendMessageToUserTool};
