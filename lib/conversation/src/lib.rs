//! Conversation service for langbuddy.
//!
//! This crate provides:
//!
//! - **Messages**: immutable role-tagged turns
//! - **Sessions**: capped, FIFO-trimmed conversation histories
//! - **Session Store**: process-wide histories with per-session locks
//! - **Chat Orchestrator**: open chat and guided conversation practice

pub mod error;
pub mod message;
pub mod orchestrator;
pub mod session;
pub mod store;

pub use error::ConversationError;
pub use message::{Message, MessageRole};
pub use orchestrator::ChatOrchestrator;
pub use session::{RETENTION_CAP, Session};
pub use store::{SessionGuard, SessionStore};
