//! Message types for conversations.

use chrono::{DateTime, Utc};
use langbuddy_ai::LlmMessage;
pub use langbuddy_ai::MessageRole;
use langbuddy_core::MessageId;
use serde::{Deserialize, Serialize};

/// One turn in a conversation.
///
/// Messages are immutable once created: fields are set by the constructors
/// and only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: MessageRole,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Unique message identifier.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Message role.
    #[must_use]
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// Message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was created.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<&Message> for LlmMessage {
    fn from(message: &Message) -> Self {
        LlmMessage::new(message.role, message.content.clone())
    }
}
