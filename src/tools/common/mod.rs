//! Common/built-in tools
//!
//! - `AgentEndTaskTool` - Finish the task with a final message
//! - `SendMessageToUserTool` - Hand a message to the user and wait for a reply

pub mod end_task;
pub mod send_message;

pub use end_task::{AgentEndTaskTool, END_TASK_TOOL_NAME};
pub use send_message::{SendMessageToUserTool, SEND_MESSAGE_TOOL_NAME};
