//! Chat orchestration over the session store.
//!
//! The orchestrator is the only writer of session histories. Every turn
//! holds the session lock from the user append through the provider call to
//! the assistant append, so the provider always sees the history after the
//! latest append and concurrent turns on one key never interleave.
//!
//! When the provider fails, the user's message stays in the history but no
//! assistant turn is recorded; error text never enters the context of later
//! turns.

use crate::error::ConversationError;
use crate::message::Message;
use crate::store::{SessionGuard, SessionStore};
use langbuddy_ai::prompt::{CHAT_SYSTEM, TUTOR_SYSTEM};
use langbuddy_ai::{CREATIVE_TEMPERATURE, LlmBackend, LlmMessage, LlmRequest};
use langbuddy_core::{Result, SessionKey};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Drives open chat and guided conversation practice.
#[derive(Clone)]
pub struct ChatOrchestrator {
    backend: Arc<dyn LlmBackend>,
    sessions: Arc<SessionStore>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator over a backend and a shared session store.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    /// Returns the session store this orchestrator writes to.
    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Runs one open-chat turn.
    ///
    /// The provider receives the generic assistant system prompt followed by
    /// the retained history, which already ends with `message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    #[instrument(skip(self, message), fields(session = %key))]
    pub async fn chat(
        &self,
        key: &SessionKey,
        message: &str,
    ) -> Result<String, ConversationError> {
        let mut session = self.sessions.lock(key).await;
        session.push(Message::user(message));

        let mut messages = Vec::with_capacity(session.len() + 1);
        messages.push(LlmMessage::system(CHAT_SYSTEM));
        messages.extend(session.llm_messages());

        self.reply(key, &mut session, messages).await
    }

    /// Runs one guided-conversation turn.
    ///
    /// Without a `user_response` (absent or blank) the conversation restarts:
    /// the session is reset to a single tutor system message for
    /// `language` and `topic`, and the assistant's opening line is recorded.
    /// With a `user_response` it is appended and the provider receives the
    /// stored history, tutor framing included.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    #[instrument(skip(self, topic, user_response), fields(session = %key))]
    pub async fn converse(
        &self,
        key: &SessionKey,
        language: &str,
        topic: &str,
        user_response: Option<&str>,
    ) -> Result<String, ConversationError> {
        match user_response.filter(|r| !r.trim().is_empty()) {
            None => self.start_conversation(key, language, topic).await,
            Some(response) => {
                let mut session = self.sessions.lock(key).await;
                session.push(Message::user(response));
                let messages = session.llm_messages();
                self.reply(key, &mut session, messages).await
            }
        }
    }

    async fn start_conversation(
        &self,
        key: &SessionKey,
        language: &str,
        topic: &str,
    ) -> Result<String, ConversationError> {
        let framing = TUTOR_SYSTEM
            .render(&[("language", language), ("topic", topic)])
            .map_err(ConversationError::Prompt)?;

        let mut session = self.sessions.lock(key).await;
        session.clear();
        session.push(Message::system(framing));
        debug!("Conversation practice restarted");

        let mut messages = session.llm_messages();
        messages.push(LlmMessage::user(""));

        self.reply(key, &mut session, messages).await
    }

    async fn reply(
        &self,
        key: &SessionKey,
        session: &mut SessionGuard,
        messages: Vec<LlmMessage>,
    ) -> Result<String, ConversationError> {
        let request = LlmRequest::new(messages).with_temperature(CREATIVE_TEMPERATURE);

        let response = self.backend.complete(&request).await.map_err(|report| {
            warn!(error = %report.current_context(), "Assistant turn failed; keeping user turn only");
            let source = report.current_context().clone();
            report.context(ConversationError::Provider {
                session_key: key.clone(),
                source,
            })
        })?;

        let message = Message::assistant(response.content);
        debug!(
            message_id = %message.id(),
            timestamp = %message.timestamp(),
            history_len = session.len() + 1,
            "Assistant turn stored"
        );
        let content = message.content().to_string();
        session.push(message);
        Ok(content)
    }
}
