//! End task tool
//!
//! Lets the model declare that it is finished. The agent stops looping once
//! the current turn's tool calls are all handled.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::super::tool::{Tool, ToolArgs};
use crate::schema::{ParamSpec, ParamType, ReturnType, ToolSignature};

/// Name the end task tool is registered under
pub const END_TASK_TOOL_NAME: &str = "agent_end_task";

const DEFAULT_FINAL_MESSAGE: &str = "Task completed";

#[derive(Debug, Deserialize)]
struct EndTaskInput {
    #[serde(default = "default_final_message")]
    message: String,
}

fn default_final_message() -> String {
    DEFAULT_FINAL_MESSAGE.to_string()
}

/// End task tool
pub struct AgentEndTaskTool;

impl AgentEndTaskTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AgentEndTaskTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AgentEndTaskTool {
    fn name(&self) -> &str {
        END_TASK_TOOL_NAME
    }

    fn description(&self) -> &str {
        "End your task once you have finished processing the request"
    }

    fn signature(&self) -> ToolSignature {
        ToolSignature::new()
            .param(ParamSpec::receiver())
            .param(
                ParamSpec::new("message", ParamType::String)
                    .describe("Final message to send to user")
                    .default_value(DEFAULT_FINAL_MESSAGE),
            )
            .returns(ReturnType::Text)
    }

    async fn execute(&self, args: ToolArgs) -> Result<Value> {
        let input: EndTaskInput = serde_json::from_value(Value::Object(args))
            .map_err(|e| anyhow::anyhow!("Invalid end task input: {}", e))?;

        tracing::info!("[AgentEndTask] {}", input.message);

        Ok(Value::String(input.message))
    }

    fn ends_task(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CompiledTool;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_message() {
        let tool = AgentEndTaskTool::new();
        let mut args = ToolArgs::new();
        args.insert("message".into(), json!("bye"));

        assert_eq!(tool.execute(args).await.unwrap(), json!("bye"));
        assert_eq!(
            tool.execute(ToolArgs::new()).await.unwrap(),
            json!("Task completed")
        );
    }

    #[test]
    fn test_schema() {
        let tool = CompiledTool::new(AgentEndTaskTool::new()).unwrap();
        let schema = tool.schema().to_json();

        assert!(tool.ends_task());
        assert_eq!(schema["properties"]["message"]["type"], "string");
        assert_eq!(
            schema["properties"]["message"]["description"],
            "Final message to send to user"
        );
        assert_eq!(schema["required"], json!([]));
    }
}
