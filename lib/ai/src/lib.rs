//! AI primitives for langbuddy.
//!
//! This crate provides:
//!
//! - **Provider client**: the [`LlmBackend`] trait and the Groq implementation
//! - **Prompts**: the templates used by every language tool
//! - **Task tools**: single-shot translation, grammar correction, and
//!   roleplay openers built on top of a backend

pub mod backend;
pub mod error;
pub mod groq;
pub mod prompt;
pub mod task;

pub use backend::{
    CREATIVE_TEMPERATURE, LlmBackend, LlmMessage, LlmRequest, LlmResponse, MessageRole,
    PRECISE_TEMPERATURE, TokenUsage,
};
pub use error::{LlmError, PromptError, TaskError};
pub use groq::{GroqBackend, GroqConfig};
pub use task::{ConversationStarterTool, GrammarTool, TranslationTool};
