//! Append-only conversation history.
//!
//! The transcript is created empty when the window opens and dropped at exit.
//! Entries are only ever appended; nothing is edited, reordered, truncated or
//! written to disk.

use crate::api::ChatMessage;
use crate::core::message::Message;

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> usize {
        self.push(Message::user(content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> usize {
        self.push(Message::assistant(content))
    }

    pub fn push_app_error(&mut self, content: impl Into<String>) -> usize {
        self.push(Message::app_error(content))
    }

    /// Appends a message and returns its index.
    fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Full user/assistant context in conversation order, ready to send.
    pub fn api_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter_map(|msg| {
                msg.role.to_api_role().map(|role| ChatMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect()
    }

    /// Number of entries that take part in the conversation (user and assistant).
    pub fn turn_count(&self) -> usize {
        self.messages.iter().filter(|msg| !msg.is_app()).count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::TranscriptRole;

    #[test]
    fn starts_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.turn_count(), 0);
        assert!(transcript.api_messages().is_empty());
    }

    #[test]
    fn push_returns_indices_in_order() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push_user("one"), 0);
        assert_eq!(transcript.push_assistant("two"), 1);
        assert_eq!(transcript.push_user("three"), 2);

        let roles: Vec<TranscriptRole> = transcript.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                TranscriptRole::User,
                TranscriptRole::Assistant,
                TranscriptRole::User
            ]
        );
    }

    #[test]
    fn api_messages_skip_app_entries() {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello");
        transcript.push_app_error("API Error: boom");
        transcript.push_user("Hello again");
        transcript.push_assistant("Hi!");

        let api = transcript.api_messages();
        assert_eq!(api.len(), 3);
        assert_eq!(api[0].role, "user");
        assert_eq!(api[0].content, "Hello");
        assert_eq!(api[1].content, "Hello again");
        assert_eq!(api[2].role, "assistant");
        assert_eq!(transcript.turn_count(), 3);
        assert_eq!(transcript.len(), 4);
    }
}
