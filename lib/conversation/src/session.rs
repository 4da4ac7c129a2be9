//! Conversation session history.
//!
//! A session keeps the most recent messages of one conversation, up to a
//! fixed retention cap. When an append pushes the history past the cap the
//! oldest message is evicted, whatever its role. A tutor framing stored as
//! the first system message can therefore fall out of a long conversation.

use crate::message::Message;
use langbuddy_ai::LlmMessage;
use langbuddy_core::SessionKey;
use std::collections::VecDeque;

/// Maximum number of messages retained per session.
pub const RETENTION_CAP: usize = 20;

/// A conversation's ordered, capped message history.
#[derive(Debug, Clone)]
pub struct Session {
    key: SessionKey,
    capacity: usize,
    messages: VecDeque<Message>,
}

impl Session {
    /// Creates an empty session with the default retention cap.
    #[must_use]
    pub fn new(key: SessionKey) -> Self {
        Self::with_capacity(key, RETENTION_CAP)
    }

    /// Creates an empty session retaining at most `capacity` messages.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(key: SessionKey, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            key,
            capacity,
            messages: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Appends a message, evicting the oldest one if the cap is exceeded.
    ///
    /// Returns the evicted message, if any. At most one message is evicted
    /// per call.
    pub fn push(&mut self, message: Message) -> Option<Message> {
        self.messages.push_back(message);
        if self.messages.len() > self.capacity {
            self.messages.pop_front()
        } else {
            None
        }
    }

    /// Drops every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns the session key.
    #[must_use]
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Returns the retention cap.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of retained messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no messages are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over retained messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Copies the retained messages, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Converts the retained messages into provider messages.
    #[must_use]
    pub fn llm_messages(&self) -> Vec<LlmMessage> {
        self.messages.iter().map(LlmMessage::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;

    fn session() -> Session {
        Session::new(SessionKey::default())
    }

    #[test]
    fn session_creation() {
        let session = session();
        assert!(session.is_empty());
        assert_eq!(session.capacity(), RETENTION_CAP);
        assert_eq!(session.key().as_str(), "default");
    }

    #[test]
    fn length_is_min_of_appends_and_cap() {
        for n in [0, 1, 19, 20, 21, 45] {
            let mut session = session();
            for i in 0..n {
                session.push(Message::user(format!("m{i}")));
            }
            assert_eq!(session.len(), n.min(RETENTION_CAP), "after {n} appends");
        }
    }

    #[test]
    fn retains_the_last_twenty_in_order() {
        let mut session = session();
        for i in 0..33 {
            session.push(Message::user(format!("m{i}")));
        }

        let contents: Vec<String> = session.messages().map(|m| m.content().to_string()).collect();
        let expected: Vec<String> = (13..33).map(|i| format!("m{i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn evicts_exactly_one_oldest_message_per_push() {
        let mut session = Session::with_capacity(SessionKey::default(), 2);
        assert!(session.push(Message::user("a")).is_none());
        assert!(session.push(Message::user("b")).is_none());

        let evicted = session.push(Message::user("c")).expect("evicted");
        assert_eq!(evicted.content(), "a");
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn system_prompt_can_fall_out_of_context() {
        let mut session = Session::with_capacity(SessionKey::default(), 3);
        session.push(Message::system("You are a tutor."));
        session.push(Message::assistant("Hola"));
        session.push(Message::user("Hola"));
        session.push(Message::assistant("¿Cómo estás?"));

        assert!(session.messages().all(|m| m.role() != MessageRole::System));
    }

    #[test]
    fn clear_empties_the_history() {
        let mut session = session();
        session.push(Message::user("hello"));
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.messages().count(), 0);
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let mut session = Session::with_capacity(SessionKey::default(), 0);
        session.push(Message::user("a"));
        session.push(Message::user("b"));
        assert_eq!(session.len(), 1);
        assert_eq!(session.snapshot()[0].content(), "b");
    }

    #[test]
    fn llm_messages_preserve_roles_and_order() {
        let mut session = session();
        session.push(Message::system("sys"));
        session.push(Message::user("hi"));

        let wire = session.llm_messages();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, MessageRole::System);
        assert_eq!(wire[1].content, "hi");
    }
}
