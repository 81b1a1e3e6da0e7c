//! Tool registry for managing available tools
//!
//! The registry holds every tool available to one agent, keyed by name.
//! Tools are compiled on registration, so a tool with an incomplete
//! signature never makes it in.

use std::collections::HashMap;
use std::sync::Arc;

use super::tool::{CompiledTool, Tool};
use crate::core::{AgentError, AgentResult};
use crate::llm::ToolDefinition;

/// Registry that holds all available tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<CompiledTool>,

    /// Name -> position in `tools`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a tool
    ///
    /// Fails on an incomplete signature or a name that is already taken.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> AgentResult<()> {
        self.register_arc(Arc::new(tool))
    }

    /// Compile and register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> AgentResult<()> {
        let compiled = CompiledTool::from_arc(tool)?;
        self.insert(compiled)
    }

    /// Register an already compiled tool
    pub fn insert(&mut self, tool: CompiledTool) -> AgentResult<()> {
        let name = tool.name().to_string();

        if self.index.contains_key(&name) {
            tracing::error!("[ToolRegistry] Tool name conflict: '{}'", name);
            return Err(AgentError::DuplicateTool(name));
        }

        tracing::info!("[ToolRegistry] Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);

        Ok(())
    }

    /// Get a tool by exact name
    pub fn get(&self, name: &str) -> Option<&CompiledTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool descriptors for the completion service, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Get the list of tool names, in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledTool> {
        self.tools.iter()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaError;
    use crate::schema::{ParamSpec, ParamType, ReturnType, ToolSignature};
    use crate::tools::ToolArgs;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::Value;

    struct NamedTool {
        name: &'static str,
        typed: bool,
    }

    #[async_trait]
    impl Tool for NamedTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn signature(&self) -> ToolSignature {
            let param = if self.typed {
                ParamSpec::new("x", ParamType::String)
            } else {
                ParamSpec::untyped("x")
            };
            ToolSignature::new().param(param).returns(ReturnType::Text)
        }

        async fn execute(&self, _args: ToolArgs) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registration_order_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(NamedTool { name: "b", typed: true }).unwrap();
        registry.register(NamedTool { name: "a", typed: true }).unwrap();

        assert_eq!(registry.tool_names(), vec!["b", "a"]);
        assert!(registry.contains("a"));
        assert_eq!(registry.get("a").map(|t| t.name()), Some("a"));

        let defs = registry.definitions();
        assert_eq!(defs[0].function.name, "b");
        assert_eq!(defs[1].function.name, "a");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(NamedTool { name: "dup", typed: true }).unwrap();
        let err = registry
            .register(NamedTool { name: "dup", typed: true })
            .unwrap_err();

        assert!(matches!(err, AgentError::DuplicateTool(ref n) if n == "dup"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_untyped_tool_rejected() {
        let mut registry = ToolRegistry::new();
        let err = registry
            .register(NamedTool { name: "bad", typed: false })
            .unwrap_err();

        assert!(matches!(
            err,
            AgentError::Schema(SchemaError::MissingParameterTypes { .. })
        ));
        assert!(registry.is_empty());
    }
}
