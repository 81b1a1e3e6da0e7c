//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.
//! A tool is only usable once it has been compiled into a [`CompiledTool`],
//! which checks its signature up front.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::SchemaError;
use crate::llm::ToolDefinition;
use crate::schema::{self, ParameterSchema, ToolSignature};

/// Keyword arguments passed to a tool
pub type ToolArgs = Map<String, Value>;

/// Trait for tools that the agent can use
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Declared parameters and result type of [`execute`](Tool::execute)
    fn signature(&self) -> ToolSignature;

    /// Execute the tool with keyword arguments
    ///
    /// The returned value is embedded unchanged into the conversation.
    async fn execute(&self, args: ToolArgs) -> Result<Value>;

    /// Whether calling this tool finishes the agent's task
    ///
    /// Default is false.
    fn ends_task(&self) -> bool {
        false
    }
}

/// A tool whose signature has been compiled into a parameter schema
#[derive(Clone)]
pub struct CompiledTool {
    tool: Arc<dyn Tool>,
    schema: ParameterSchema,
}

impl CompiledTool {
    /// Compile a tool's signature, failing if any annotation is missing
    pub fn new<T: Tool + 'static>(tool: T) -> Result<Self, SchemaError> {
        Self::from_arc(Arc::new(tool))
    }

    /// Compile an already shared tool
    pub fn from_arc(tool: Arc<dyn Tool>) -> Result<Self, SchemaError> {
        let schema = schema::compile(tool.name(), &tool.signature())?;
        Ok(Self { tool, schema })
    }

    pub fn name(&self) -> &str {
        self.tool.name()
    }

    pub fn description(&self) -> &str {
        self.tool.description()
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn ends_task(&self) -> bool {
        self.tool.ends_task()
    }

    /// Descriptor for the completion service
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(self.name(), self.description(), self.schema.to_json())
    }

    /// Invoke the underlying tool
    pub async fn execute(&self, args: ToolArgs) -> Result<Value> {
        self.tool.execute(args).await
    }
}

impl std::fmt::Debug for CompiledTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTool")
            .field("name", &self.name())
            .field("schema", &self.schema)
            .finish()
    }
}
