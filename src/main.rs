use std::env;
use std::sync::Arc;

use colored::Colorize;
use futures::StreamExt;

use tool_loop_sdk::llm::OpenAiProvider;
use tool_loop_sdk::tools::{AgentEndTaskTool, SendMessageToUserTool};
use tool_loop_sdk::{Agent, AgentConfig, Tool, TurnResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tool_loop_sdk=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <message>", args[0]);
        std::process::exit(2);
    }
    let user_message = args[1..].join(" ");

    let llm = Arc::new(OpenAiProvider::from_env()?);
    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(SendMessageToUserTool::new()),
        Arc::new(AgentEndTaskTool::new()),
    ];
    let mut agent = Agent::with_tools(llm, AgentConfig::default(), tools)?;

    println!("{} {}", "You:".bold().blue(), user_message);

    let mut turns = agent.run(user_message);
    while let Some(turn) = turns.next().await {
        match turn? {
            TurnResult::Response(message) => {
                if let Some(text) = message.content.as_deref().filter(|t| !t.is_empty()) {
                    println!("{} {}", "Assistant:".bold().green(), text);
                }
                for call in message.calls() {
                    println!(
                        "{}",
                        format!("  -> {}({:?})", call.function_name(), call.arguments()).dimmed()
                    );
                }
            }
            TurnResult::ToolOutcomes(outcomes) => {
                for outcome in outcomes {
                    println!(
                        "{} {}",
                        format!("[{}]", outcome.tool_name).bold().yellow(),
                        outcome.content()
                    );
                }
            }
        }
    }
    drop(turns);

    println!(
        "{}",
        format!(
            "Done after {} step(s), {} messages in history",
            agent.step_index(),
            agent.history().len()
        )
        .dimmed()
    );

    Ok(())
}
