//! In-memory conversation history
//!
//! Append-only log of [`Message`]s. Entries are never reordered or spliced;
//! the only way to remove them is [`ConversationHistory::clear`].

use crate::llm::Message;

/// Ordered message log for one agent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message
    pub fn add_message(&mut self, message: Message) {
        tracing::debug!(
            "[History] Adding {} message (now {} messages)",
            message.role,
            self.messages.len() + 1
        );
        self.messages.push(message);
    }

    /// All messages, in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Remove every message
    pub fn clear(&mut self) {
        tracing::debug!("[History] Clearing ({} messages)", self.messages.len());
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
