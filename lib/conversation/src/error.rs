//! Error types for the conversation crate.
//!
//! Session store operations are total and never fail; only the
//! orchestrator's provider round-trip can.

use langbuddy_ai::{LlmError, PromptError};
use langbuddy_core::SessionKey;
use std::fmt;

/// Errors from chat orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// The tutor framing could not be rendered.
    Prompt(PromptError),
    /// The provider call for this session failed.
    Provider {
        session_key: SessionKey,
        source: LlmError,
    },
}

impl ConversationError {
    /// Returns the underlying provider error, if any.
    #[must_use]
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            Self::Provider { source, .. } => Some(source),
            Self::Prompt(_) => None,
        }
    }
}

impl fmt::Display for ConversationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt(err) => write!(f, "{err}"),
            Self::Provider {
                session_key,
                source,
            } => {
                write!(f, "reply for session '{session_key}' failed: {source}")
            }
        }
    }
}

impl std::error::Error for ConversationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display() {
        let err = ConversationError::Provider {
            session_key: SessionKey::new("tab-1"),
            source: LlmError::Timeout,
        };
        assert!(err.to_string().contains("tab-1"));
        assert!(err.to_string().contains("timed out"));
        assert_eq!(err.llm_error(), Some(&LlmError::Timeout));
    }
}
