//! Tool Dispatcher
//!
//! Resolves a model's tool call against the registry, normalizes its
//! arguments and invokes the tool. Errors are returned as-is: nothing is
//! retried and nothing is turned into a tool message here.

use serde_json::Value;

use crate::core::{AgentError, AgentResult, ToolOutcome};
use crate::llm::ToolCall;
use crate::tools::{CompiledTool, ToolArgs, ToolRegistry};

/// Dispatches tool calls to registered tools
pub struct ToolDispatcher;

impl ToolDispatcher {
    /// Resolve a tool by exact name
    pub fn resolve<'a>(tools: &'a ToolRegistry, call: &ToolCall) -> AgentResult<&'a CompiledTool> {
        tools.get(call.function_name()).ok_or_else(|| {
            tracing::error!(
                "[Dispatcher] Tool '{}' not found (registered: {:?})",
                call.function_name(),
                tools.tool_names()
            );
            AgentError::ToolNotFound(call.function_name().to_string())
        })
    }

    /// Build the keyword arguments for a call
    ///
    /// Encoded and structured arguments normalize to the same map. Parameters
    /// the model left out but which declare a default get that default.
    pub fn prepare_arguments(tool: &CompiledTool, call: &ToolCall) -> AgentResult<ToolArgs> {
        let mut args = call
            .arguments()
            .to_map()
            .map_err(|reason| AgentError::invalid_arguments(tool.name(), reason))?;

        for (name, default) in tool.schema().defaults() {
            if !args.contains_key(name) {
                args.insert(name.to_string(), default.clone());
            }
        }

        Ok(args)
    }

    /// Dispatch one tool call and return the tool's raw output
    pub async fn dispatch(tools: &ToolRegistry, call: &ToolCall) -> AgentResult<Value> {
        let tool = Self::resolve(tools, call)?;
        let args = Self::prepare_arguments(tool, call)?;

        tracing::info!("[Dispatcher] Executing tool: {} ({})", tool.name(), call.id);
        tracing::debug!("[Dispatcher] Arguments: {:?}", args);

        let output = tool
            .execute(args)
            .await
            .map_err(|e| AgentError::tool_execution(tool.name(), e))?;

        tracing::debug!("[Dispatcher] Tool {} completed", tool.name());

        Ok(output)
    }

    /// Dispatch one tool call, wrapping the output with its call id
    ///
    /// Also reports whether the tool ends the agent's task.
    pub async fn dispatch_outcome(
        tools: &ToolRegistry,
        call: &ToolCall,
    ) -> AgentResult<(ToolOutcome, bool)> {
        let output = Self::dispatch(tools, call).await?;
        let ends_task = tools
            .get(call.function_name())
            .map(|t| t.ends_task())
            .unwrap_or(false);

        Ok((
            ToolOutcome::new(&call.id, call.function_name(), output),
            ends_task,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamSpec, ParamType, ReturnType, ToolSignature};
    use crate::tools::Tool;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::{json, Map};
    use std::sync::{Arc, Mutex};

    /// Records every argument map it is invoked with
    struct WeatherTool {
        calls: Arc<Mutex<Vec<ToolArgs>>>,
    }

    #[async_trait]
    impl Tool for WeatherTool {
        fn name(&self) -> &str {
            "weather"
        }

        fn description(&self) -> &str {
            "Get weather"
        }

        fn signature(&self) -> ToolSignature {
            ToolSignature::new()
                .param(ParamSpec::new("location", ParamType::String))
                .param(ParamSpec::new("units", ParamType::String).default_value("celsius"))
                .returns(ReturnType::Text)
        }

        async fn execute(&self, args: ToolArgs) -> Result<Value> {
            let location = args
                .get("location")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow::anyhow!("location is required"))?
                .to_string();
            self.calls.lock().unwrap().push(args);
            Ok(json!(format!("Weather in {}: Sunny, 25°C", location)))
        }
    }

    fn registry() -> (ToolRegistry, Arc<Mutex<Vec<ToolArgs>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry
            .register(WeatherTool {
                calls: calls.clone(),
            })
            .unwrap();
        (registry, calls)
    }

    #[tokio::test]
    async fn test_encoded_and_structured_arguments_match() {
        let (tools, calls) = registry();

        let mut map = Map::new();
        map.insert("location".into(), json!("Paris"));

        let encoded = ToolCall::new("c1", "weather", r#"{"location":"Paris"}"#);
        let structured = ToolCall::new("c2", "weather", map);

        let a = ToolDispatcher::dispatch(&tools, &encoded).await.unwrap();
        let b = ToolDispatcher::dispatch(&tools, &structured).await.unwrap();

        assert_eq!(a, b);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0]["location"], "Paris");
    }

    #[tokio::test]
    async fn test_defaults_filled_but_not_overridden() {
        let (tools, calls) = registry();

        let defaulted = ToolCall::new("c1", "weather", r#"{"location":"Oslo"}"#);
        let explicit = ToolCall::new("c2", "weather", r#"{"location":"Oslo","units":"kelvin"}"#);
        ToolDispatcher::dispatch(&tools, &defaulted).await.unwrap();
        ToolDispatcher::dispatch(&tools, &explicit).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0]["units"], "celsius");
        assert_eq!(calls[1]["units"], "kelvin");
    }

    #[tokio::test]
    async fn test_unknown_tool_named_in_error() {
        let (tools, calls) = registry();
        let call = ToolCall::new("c1", "ghost", "{}");

        let err = ToolDispatcher::dispatch(&tools, &call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(ref name) if name == "ghost"));
        assert!(err.to_string().contains("ghost"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tool_failure_propagates() {
        let (tools, _calls) = registry();
        let call = ToolCall::new("c1", "weather", "{}");

        let err = ToolDispatcher::dispatch(&tools, &call).await.unwrap_err();
        match err {
            AgentError::ToolExecution { tool, source } => {
                assert_eq!(tool, "weather");
                assert_eq!(source.to_string(), "location is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_arguments() {
        let (tools, _calls) = registry();
        let call = ToolCall::new("c1", "weather", "not json");

        let err = ToolDispatcher::dispatch(&tools, &call).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidArguments { ref tool, .. } if tool == "weather"));
    }

    #[tokio::test]
    async fn test_outcome_carries_call_id() {
        let (tools, _calls) = registry();
        let call = ToolCall::new("call_9", "weather", r#"{"location":"Rome"}"#);

        let (outcome, ends_task) = ToolDispatcher::dispatch_outcome(&tools, &call).await.unwrap();
        assert_eq!(outcome.tool_call_id, "call_9");
        assert_eq!(outcome.tool_name, "weather");
        assert_eq!(outcome.content(), "Weather in Rome: Sunny, 25°C");
        assert!(!ends_task);
    }
}
