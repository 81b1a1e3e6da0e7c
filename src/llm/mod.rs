pub mod openai;
pub mod provider;
pub mod scripted;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::CompletionService;
pub use scripted::{RecordedRequest, ScriptedProvider};
pub use types::{
    FunctionCall, FunctionDefinition, Message, Role, ToolArguments, ToolCall, ToolDefinition,
};
