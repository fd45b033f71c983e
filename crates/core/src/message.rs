//! Chat messages and transcripts.
//!
//! The resolver is stateless; whoever renders a chat keeps the history here.
//! User types a message → resolver picks a reply → both land in the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The learner
    User,
    /// The canned assistant
    Assistant,
}

/// A single message in a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// An ordered chat history bound to an optional context tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// The context tag the chat was opened with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    pub messages: Vec<ChatMessage>,

    pub started_at: DateTime<Utc>,
}

impl Transcript {
    pub fn new(context: Option<String>) -> Self {
        Self {
            context,
            messages: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Number of messages the learner sent.
    pub fn user_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = ChatMessage::user("Explain blending modes");
        assert_eq!(msg.role, Role::User);
        assert!(msg.is_user());
        assert_eq!(msg.text, "Explain blending modes");
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::assistant("one");
        let b = ChatMessage::assistant("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn transcript_counts_user_turns() {
        let mut transcript = Transcript::new(Some("Practice Studio".into()));
        assert!(transcript.is_empty());

        transcript.push(ChatMessage::assistant("greeting"));
        transcript.push(ChatMessage::user("crop ideas?"));
        transcript.push(ChatMessage::assistant("cropping"));

        assert_eq!(transcript.user_turns(), 1);
        assert_eq!(transcript.last().unwrap().text, "cropping");
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
    }
}
