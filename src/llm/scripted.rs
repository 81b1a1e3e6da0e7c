//! Scripted completion service
//!
//! Replays queued assistant messages in order and records every request it
//! receives. Used for offline runs and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;

use super::provider::CompletionService;
use super::types::{Message, ToolDefinition};

/// One recorded `complete` call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
}

/// Completion service that answers from a queue of canned replies
///
/// When the queue runs dry it either repeats the last reply forever
/// (see [`ScriptedProvider::repeating`]) or fails.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Message, String>>>,
    repeat: Option<Message>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    /// Reply with each message once, in order
    pub fn new(replies: impl IntoIterator<Item = Message>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the same message on every call
    pub fn repeating(reply: Message) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            repeat: Some(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure for the next call
    pub fn push_error(&self, message: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(message.into()));
        }
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of `complete` calls so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl CompletionService for ScriptedProvider {
    async fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Message> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                messages: messages.to_vec(),
                tools: tools.to_vec(),
            });
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| anyhow::anyhow!("Scripted reply queue poisoned"))?
            .pop_front();

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => match &self.repeat {
                Some(reply) => Ok(reply.clone()),
                None => anyhow::bail!("Scripted provider has no more replies"),
            },
        }
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}
