//! Error types for the speech crate.

use std::fmt;
use std::path::PathBuf;

/// Errors from speech synthesis and clip storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The language code is not in the supported table.
    UnsupportedLanguage { code: String },
    /// There was nothing to synthesize.
    EmptyText,
    /// The request could not be sent or the connection failed.
    RequestFailed { reason: String },
    /// The provider answered with a non-success status.
    HttpStatus { status: u16 },
    /// Timeout waiting for audio.
    Timeout,
    /// Writing the clip to disk failed.
    Storage { path: PathBuf, reason: String },
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLanguage { code } => {
                write!(f, "language '{code}' is not supported for speech")
            }
            Self::EmptyText => write!(f, "no text to synthesize"),
            Self::RequestFailed { reason } => {
                write!(f, "speech request failed: {reason}")
            }
            Self::HttpStatus { status } => {
                write!(f, "speech provider returned HTTP {status}")
            }
            Self::Timeout => write!(f, "speech request timed out"),
            Self::Storage { path, reason } => {
                write!(f, "failed to write audio to {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for SpeechError {}
