//! Speech synthesis for langbuddy.
//!
//! This crate provides:
//!
//! - **Languages**: the table of language codes the synthesizer accepts
//! - **Providers**: the [`SpeechProvider`] trait and a Google Translate TTS
//!   backend
//! - **Speech Tool**: synthesizes text and stores the MP3 under the public
//!   audio directory

pub mod error;
pub mod language;
pub mod provider;
pub mod tool;

pub use error::SpeechError;
pub use language::{Language, SUPPORTED_LANGUAGES};
pub use provider::{GoogleTranslateTts, SpeechProvider};
pub use tool::{AudioClip, SpeechTool};
