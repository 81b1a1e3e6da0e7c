//! Turn results produced by an agent run

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::Message;

/// Outcome of one dispatched tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// ID of the tool call this answers
    pub tool_call_id: String,
    /// Tool that produced it
    pub tool_name: String,
    /// Raw value returned by the tool
    pub output: Value,
}

impl ToolOutcome {
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output,
        }
    }

    /// Text form of the output: strings verbatim, anything else as JSON
    pub fn content(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The `tool` message recorded in history
    pub fn to_message(&self) -> Message {
        Message::tool(&self.tool_call_id, self.content())
    }
}

/// One observable result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnResult {
    /// Assistant message returned by the completion service
    Response(Message),

    /// Every tool outcome from one turn, in call order
    ToolOutcomes(Vec<ToolOutcome>),
}

impl TurnResult {
    pub fn as_response(&self) -> Option<&Message> {
        match self {
            TurnResult::Response(message) => Some(message),
            TurnResult::ToolOutcomes(_) => None,
        }
    }

    pub fn as_tool_outcomes(&self) -> Option<&[ToolOutcome]> {
        match self {
            TurnResult::Response(_) => None,
            TurnResult::ToolOutcomes(outcomes) => Some(outcomes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use serde_json::json;

    #[test]
    fn test_outcome_content() {
        let text = ToolOutcome::new("c1", "echo", json!("bye"));
        assert_eq!(text.content(), "bye");

        let structured = ToolOutcome::new("c2", "search", json!({"status": "ok"}));
        assert_eq!(structured.content(), r#"{"status":"ok"}"#);

        let message = text.to_message();
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("c1"));
        assert_eq!(message.content.as_deref(), Some("bye"));
    }

    #[test]
    fn test_turn_result_accessors() {
        let response = TurnResult::Response(Message::assistant("hi"));
        assert!(response.as_response().is_some());
        assert!(response.as_tool_outcomes().is_none());

        let batch = TurnResult::ToolOutcomes(vec![ToolOutcome::new("c", "t", json!(1))]);
        assert_eq!(batch.as_tool_outcomes().map(|o| o.len()), Some(1));
    }
}
