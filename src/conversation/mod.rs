//! Conversation history kept in process memory

mod history;

pub use history::ConversationHistory;
