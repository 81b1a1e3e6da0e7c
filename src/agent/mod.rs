pub mod agent_loop;
pub mod config;
pub mod dispatcher;
pub mod system_prompt;

pub use agent_loop::{Agent, TurnStream};
pub use config::{AgentConfig, MAX_STEPS};
pub use dispatcher::ToolDispatcher;
pub use system_prompt::{default_system_prompt, SYSTEM_PROMPT};
