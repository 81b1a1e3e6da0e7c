//! Send message tool
//!
//! Hands a message to the user and ends the run so the user can reply.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::super::tool::{Tool, ToolArgs};
use crate::schema::{ParamSpec, ParamType, ReturnType, ToolSignature};

/// Name the send message tool is registered under
pub const SEND_MESSAGE_TOOL_NAME: &str = "send_message_to_user";

#[derive(Debug, Deserialize)]
struct SendMessageInput {
    message: String,
}

/// Send a message to the user and wait for their response
pub struct SendMessageToUserTool;

impl SendMessageToUserTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendMessageToUserTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SendMessageToUserTool {
    fn name(&self) -> &str {
        SEND_MESSAGE_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Send a message to user and wait for response"
    }

    fn signature(&self) -> ToolSignature {
        ToolSignature::new()
            .param(ParamSpec::receiver())
            .param(
                ParamSpec::new("message", ParamType::String)
                    .describe("The message to send to the user"),
            )
            .returns(ReturnType::Text)
    }

    async fn execute(&self, args: ToolArgs) -> Result<Value> {
        let input: SendMessageInput = serde_json::from_value(Value::Object(args))
            .map_err(|e| anyhow::anyhow!("Invalid send message input: {}", e))?;

        Ok(Value::String(input.message))
    }

    fn ends_task(&self) -> bool {
        true
    }
}
