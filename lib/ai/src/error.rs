//! Error types for the AI crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `LlmError`: everything between sending a request and reading the
//!   completion text back
//! - `PromptError`: prompt template rendering
//! - `TaskError`: failure of a single-shot language task

use std::fmt;

/// Errors from LLM backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// No API key was configured.
    MissingCredential { variable: String },
    /// The provider rejected the API key.
    InvalidCredential { status: u16 },
    /// The request could not be sent or the connection failed.
    RequestFailed { reason: String },
    /// The provider answered with a non-success status.
    HttpStatus { status: u16, body: String },
    /// Rate limit exceeded.
    RateLimited { retry_after_secs: Option<u64> },
    /// Timeout waiting for response.
    Timeout,
    /// Response parsing failed.
    ResponseParseFailed { reason: String },
    /// The provider returned no completion choices.
    EmptyResponse,
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential { variable } => {
                write!(f, "{variable} environment variable is not set")
            }
            Self::InvalidCredential { status } => {
                write!(f, "LLM provider rejected the API key (HTTP {status})")
            }
            Self::RequestFailed { reason } => {
                write!(f, "LLM request failed: {reason}")
            }
            Self::HttpStatus { status, body } => {
                write!(f, "LLM provider returned HTTP {status}: {body}")
            }
            Self::RateLimited { retry_after_secs } => {
                if let Some(secs) = retry_after_secs {
                    write!(f, "rate limited, retry after {secs}s")
                } else {
                    write!(f, "rate limited")
                }
            }
            Self::Timeout => write!(f, "LLM request timed out"),
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse LLM response: {reason}")
            }
            Self::EmptyResponse => write!(f, "LLM response contained no choices"),
        }
    }
}

impl std::error::Error for LlmError {}

/// Errors from prompt operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Missing required variable.
    MissingVariable { template: String, variable: String },
    /// A `{{` was never closed.
    Unterminated { template: String },
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable { template, variable } => {
                write!(
                    f,
                    "missing required variable '{variable}' in template '{template}'"
                )
            }
            Self::Unterminated { template } => {
                write!(f, "unterminated placeholder in template '{template}'")
            }
        }
    }
}

impl std::error::Error for PromptError {}

/// Errors from single-shot language tasks (translation, grammar, roleplay).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task prompt could not be rendered.
    Prompt(PromptError),
    /// The provider call failed.
    Llm(LlmError),
}

impl TaskError {
    /// Returns the underlying provider error, if any.
    #[must_use]
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            Self::Llm(err) => Some(err),
            Self::Prompt(_) => None,
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt(err) => write!(f, "{err}"),
            Self::Llm(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_variable() {
        let err = LlmError::MissingCredential {
            variable: "GROQ_API_KEY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GROQ_API_KEY environment variable is not set"
        );
    }

    #[test]
    fn rate_limited_display() {
        let err = LlmError::RateLimited {
            retry_after_secs: Some(12),
        };
        assert!(err.to_string().contains("12s"));
        assert_eq!(
            LlmError::RateLimited {
                retry_after_secs: None
            }
            .to_string(),
            "rate limited"
        );
    }

    #[test]
    fn prompt_error_display() {
        let err = PromptError::MissingVariable {
            template: "translation".to_string(),
            variable: "tgt_lang".to_string(),
        };
        assert!(err.to_string().contains("tgt_lang"));
        assert!(err.to_string().contains("translation"));
    }

    #[test]
    fn http_status_display() {
        let err = LlmError::HttpStatus {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }
}
