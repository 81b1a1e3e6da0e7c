//! Agent state and run phases
//!
//! `AgentState` is the single value an agent run mutates: the history, the
//! registered tools, the turn counter and the continuation flag. Every phase
//! change of a run goes through one of its transition methods, so the state
//! machine can be driven and tested without a completion service.

use serde::{Deserialize, Serialize};

use super::output::ToolOutcome;
use crate::conversation::ConversationHistory;
use crate::llm::{Message, ToolCall};
use crate::tools::ToolRegistry;

/// Phase of an agent run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run in progress yet
    #[default]
    Init,

    /// Waiting on the completion service
    AwaitingModel,

    /// Dispatching the tool calls from the last response
    HandlingToolCalls,

    /// Run finished; no further turn results
    Done,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Init => write!(f, "Init"),
            RunPhase::AwaitingModel => write!(f, "Awaiting model"),
            RunPhase::HandlingToolCalls => write!(f, "Handling tool calls"),
            RunPhase::Done => write!(f, "Done"),
        }
    }
}

/// Mutable state owned by one agent
#[derive(Debug, Clone)]
pub struct AgentState {
    history: ConversationHistory,
    tools: ToolRegistry,
    step_index: usize,
    should_continue: bool,
    phase: RunPhase,
}

impl AgentState {
    /// Create state for a new agent, seeding the system prompt if any
    pub fn new(tools: ToolRegistry, system_prompt: Option<&str>) -> Self {
        let mut history = ConversationHistory::new();
        if let Some(prompt) = system_prompt {
            history.add_message(Message::system(prompt));
        }

        Self {
            history,
            tools,
            step_index: 0,
            should_continue: true,
            phase: RunPhase::Init,
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn should_continue(&self) -> bool {
        self.should_continue
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// INIT: reset the counters and append the user's message
    pub fn begin_run(&mut self, user_message: Message) {
        self.step_index = 0;
        self.should_continue = true;
        self.history.add_message(user_message);
        self.phase = RunPhase::AwaitingModel;
    }

    /// Record the assistant's response
    ///
    /// Returns the tool calls to dispatch, in the order the model emitted them.
    /// With no tool calls the turn is complete and the run is done.
    pub fn record_response(&mut self, response: Message) -> Vec<ToolCall> {
        let calls = response.calls().to_vec();
        self.history.add_message(response);

        if calls.is_empty() {
            self.step_index += 1;
            self.phase = RunPhase::Done;
        } else {
            self.phase = RunPhase::HandlingToolCalls;
        }

        calls
    }

    /// Record one tool outcome; `ends_task` clears the continuation flag
    ///
    /// Sibling calls in the same turn are still recorded after an end task call.
    pub fn record_tool_outcome(&mut self, outcome: &ToolOutcome, ends_task: bool) {
        self.history.add_message(outcome.to_message());
        if ends_task {
            self.should_continue = false;
        }
    }

    /// Close the tool-handling phase of a turn
    ///
    /// Counts the turn, then either goes back to the model or finishes when the
    /// task ended or `max_steps` turns have been taken.
    pub fn finish_turn(&mut self, max_steps: usize) -> RunPhase {
        self.step_index += 1;
        self.phase = if self.should_continue && self.step_index < max_steps {
            RunPhase::AwaitingModel
        } else {
            RunPhase::Done
        };
        self.phase
    }

    /// End the run abnormally; history stays as it is
    pub fn abort(&mut self) {
        self.phase = RunPhase::Done;
    }

    /// Empty the history and seed it again with `system_prompt`
    pub fn reset(&mut self, system_prompt: Option<&str>) {
        self.history.clear();
        if let Some(prompt) = system_prompt {
            self.history.add_message(Message::system(prompt));
        }
        self.step_index = 0;
        self.should_continue = true;
        self.phase = RunPhase::Init;
    }

    /// Append a system prompt to an empty history
    pub(crate) fn seed_system_prompt(&mut self, prompt: &str) {
        self.history.add_message(Message::system(prompt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use serde_json::json;

    fn tool_call(id: &str) -> ToolCall {
        ToolCall::new(id, "work", "{}")
    }

    #[test]
    fn test_new_seeds_system_prompt() {
        let state = AgentState::new(ToolRegistry::new(), Some("S"));
        assert_eq!(state.history().messages(), &[Message::system("S")]);
        assert_eq!(state.phase(), RunPhase::Init);

        let state = AgentState::new(ToolRegistry::new(), None);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_response_without_tool_calls_is_done() {
        let mut state = AgentState::new(ToolRegistry::new(), None);
        state.begin_run(Message::user("hi"));
        assert_eq!(state.phase(), RunPhase::AwaitingModel);

        let calls = state.record_response(Message::assistant("hello"));
        assert!(calls.is_empty());
        assert_eq!(state.phase(), RunPhase::Done);
        assert_eq!(state.step_index(), 1);
    }

    #[test]
    fn test_tool_turn_loops_until_cap() {
        let mut state = AgentState::new(ToolRegistry::new(), None);
        state.begin_run(Message::user("hi"));

        for turn in 1..=3 {
            let calls = state.record_response(Message::assistant_with_tool_calls(
                None,
                vec![tool_call("a"), tool_call("b")],
            ));
            assert_eq!(calls.len(), 2);
            assert_eq!(state.phase(), RunPhase::HandlingToolCalls);

            for call in &calls {
                let outcome = ToolOutcome::new(&call.id, "work", json!("ok"));
                state.record_tool_outcome(&outcome, false);
            }

            let next = state.finish_turn(3);
            assert_eq!(state.step_index(), turn);
            if turn < 3 {
                assert_eq!(next, RunPhase::AwaitingModel);
            } else {
                assert_eq!(next, RunPhase::Done);
            }
        }
    }

    #[test]
    fn test_end_task_still_records_siblings() {
        let mut state = AgentState::new(ToolRegistry::new(), None);
        state.begin_run(Message::user("hi"));
        state.record_response(Message::assistant_with_tool_calls(
            None,
            vec![tool_call("a"), tool_call("b")],
        ));

        state.record_tool_outcome(&ToolOutcome::new("a", "end", json!("bye")), true);
        state.record_tool_outcome(&ToolOutcome::new("b", "work", json!("ok")), false);

        assert!(!state.should_continue());
        assert_eq!(state.finish_turn(20), RunPhase::Done);

        let ids: Vec<_> = state
            .history()
            .iter()
            .filter(|m| m.role == Role::Tool)
            .filter_map(|m| m.tool_call_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_begin_run_resets_counters_but_keeps_history() {
        let mut state = AgentState::new(ToolRegistry::new(), Some("S"));
        state.begin_run(Message::user("first"));
        state.record_response(Message::assistant_with_tool_calls(None, vec![tool_call("a")]));
        state.record_tool_outcome(&ToolOutcome::new("a", "end", json!("x")), true);
        state.finish_turn(20);

        state.begin_run(Message::user("second"));
        assert!(state.should_continue());
        assert_eq!(state.step_index(), 0);
        assert_eq!(state.history().len(), 5);
        assert_eq!(state.history().messages()[0], Message::system("S"));
    }

    #[test]
    fn test_reset_reseeds_prompt() {
        let mut state = AgentState::new(ToolRegistry::new(), Some("S"));
        state.begin_run(Message::user("hi"));
        state.abort();
        assert!(state.phase().is_terminal());

        state.reset(Some("S"));
        assert_eq!(state.history().messages(), &[Message::system("S")]);
        assert_eq!(state.phase(), RunPhase::Init);
    }
}
