//! Core domain types and utilities for langbuddy.
//!
//! This crate provides the foundational types and error handling shared by
//! the language-learning tools, the conversation service, and the web server.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AudioClipId, MessageId, ParseIdError, SessionKey};
