//! Domain error types for route handlers.
//!
//! Every tool route answers failures with an HTML error fragment. Tool
//! failures use HTTP 500 and malformed forms keep the rejection's status.
//! The full report is logged; the fragment carries a user-safe message.

use crate::fragments;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use langbuddy_ai::{LlmError, TaskError};
use langbuddy_conversation::ConversationError;
use langbuddy_speech::SpeechError;
use rootcause::Report;
use std::fmt;

/// The tool a request was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Translation,
    Grammar,
    Pronunciation,
    Conversation,
    Roleplay,
    Chat,
}

impl Tool {
    /// Heading of the error fragment for this tool.
    #[must_use]
    pub fn error_title(self) -> &'static str {
        match self {
            Self::Translation => "Translation Error",
            Self::Grammar => "Grammar Check Error",
            Self::Pronunciation => "Error Generating Audio",
            Self::Conversation => "Conversation Error",
            Self::Roleplay => "Roleplay Error",
            Self::Chat => "Chat Error",
        }
    }
}

/// A failed tool request.
#[derive(Debug)]
pub enum RouteError {
    /// The tools could not be constructed at startup.
    Unavailable { tool: Tool, reason: String },
    /// The submitted form could not be decoded.
    InvalidForm {
        tool: Tool,
        status: StatusCode,
        reason: String,
    },
    /// A single-shot task failed.
    Task { tool: Tool, source: Report<TaskError> },
    /// A chat or conversation turn failed.
    Conversation {
        tool: Tool,
        source: Report<ConversationError>,
    },
    /// Speech synthesis or clip storage failed.
    Speech { source: Report<SpeechError> },
}

impl RouteError {
    /// Wraps a task tool failure.
    #[must_use]
    pub fn task(tool: Tool, source: Report<TaskError>) -> Self {
        Self::Task { tool, source }
    }

    /// Wraps an orchestrator failure.
    #[must_use]
    pub fn conversation(tool: Tool, source: Report<ConversationError>) -> Self {
        Self::Conversation { tool, source }
    }

    /// Wraps a speech failure.
    #[must_use]
    pub fn speech(source: Report<SpeechError>) -> Self {
        Self::Speech { source }
    }

    /// Wraps a form that failed to decode.
    #[must_use]
    pub fn invalid_form(tool: Tool, rejection: &FormRejection) -> Self {
        Self::InvalidForm {
            tool,
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }

    /// The tool the failed request was routed to.
    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Self::Unavailable { tool, .. }
            | Self::InvalidForm { tool, .. }
            | Self::Task { tool, .. }
            | Self::Conversation { tool, .. } => *tool,
            Self::Speech { .. } => Tool::Pronunciation,
        }
    }

    /// HTTP status of the error response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidForm { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable { reason, .. } | Self::InvalidForm { reason, .. } => reason.clone(),
            Self::Task { source, .. } => match source.current_context() {
                TaskError::Llm(err) => llm_message(err),
                TaskError::Prompt(_) => "The request could not be prepared.".to_string(),
            },
            Self::Conversation { source, .. } => match source.current_context().llm_error() {
                Some(err) => llm_message(err),
                None => "The request could not be prepared.".to_string(),
            },
            Self::Speech { source } => match source.current_context() {
                err @ SpeechError::UnsupportedLanguage { .. } => err.to_string(),
                SpeechError::EmptyText => "Please enter some text to pronounce.".to_string(),
                SpeechError::Timeout => "The speech service took too long to respond.".to_string(),
                SpeechError::RequestFailed { .. } | SpeechError::HttpStatus { .. } => {
                    "The speech service request failed.".to_string()
                }
                SpeechError::Storage { .. } => "The audio file could not be saved.".to_string(),
            },
        }
    }
}

fn llm_message(err: &LlmError) -> String {
    match err {
        LlmError::MissingCredential { .. } => {
            format!("{err}. Please set your Groq API key.")
        }
        LlmError::InvalidCredential { .. } => {
            "The Groq API key was rejected. Please check GROQ_API_KEY.".to_string()
        }
        LlmError::RateLimited { .. } => {
            "The language model is busy. Please try again shortly.".to_string()
        }
        LlmError::Timeout => "The language model took too long to respond.".to_string(),
        LlmError::RequestFailed { .. }
        | LlmError::HttpStatus { .. }
        | LlmError::ResponseParseFailed { .. }
        | LlmError::EmptyResponse => "The language model request failed.".to_string(),
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason, .. } => write!(f, "tools unavailable: {reason}"),
            Self::InvalidForm { reason, .. } => write!(f, "invalid form: {reason}"),
            Self::Task { source, .. } => write!(f, "{source}"),
            Self::Conversation { source, .. } => write!(f, "{source}"),
            Self::Speech { source } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for RouteError {}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let tool = self.tool();
        if matches!(self, Self::InvalidForm { .. }) {
            tracing::warn!(tool = ?tool, error = %self, "Rejected tool form");
        } else {
            tracing::error!(tool = ?tool, error = %self, "Tool request failed");
        }

        let body = fragments::error(tool.error_title(), &self.user_message());
        (self.status(), Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_message_names_the_variable() {
        let err = RouteError::task(
            Tool::Translation,
            TaskError::Llm(LlmError::MissingCredential {
                variable: "GROQ_API_KEY".to_string(),
            })
            .into(),
        );
        assert_eq!(
            err.user_message(),
            "GROQ_API_KEY environment variable is not set. Please set your Groq API key."
        );
    }

    #[test]
    fn provider_body_is_not_shown_to_users() {
        let err = RouteError::task(
            Tool::Grammar,
            TaskError::Llm(LlmError::HttpStatus {
                status: 500,
                body: "internal trace".to_string(),
            })
            .into(),
        );
        assert!(!err.user_message().contains("internal trace"));
        assert!(err.to_string().contains("internal trace"));
    }

    #[test]
    fn display_includes_the_wrapped_provider_report() {
        let provider: Report<LlmError> = LlmError::ResponseParseFailed {
            reason: "expected value at line 1".to_string(),
        }
        .into();
        let err = RouteError::task(
            Tool::Translation,
            provider.context(TaskError::Llm(LlmError::EmptyResponse)),
        );

        assert_eq!(err.user_message(), "The language model request failed.");
        assert!(err.to_string().contains("expected value at line 1"));
    }

    #[test]
    fn speech_errors_belong_to_pronunciation() {
        let err = RouteError::speech(
            SpeechError::UnsupportedLanguage {
                code: "xx".to_string(),
            }
            .into(),
        );
        assert_eq!(err.tool(), Tool::Pronunciation);
        assert_eq!(err.tool().error_title(), "Error Generating Audio");
        assert!(err.user_message().contains("'xx'"));
    }

    #[test]
    fn responds_with_500_fragment() {
        let err = RouteError::Unavailable {
            tool: Tool::Chat,
            reason: "GROQ_API_KEY environment variable is not set".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_form_keeps_the_rejection_status() {
        let err = RouteError::InvalidForm {
            tool: Tool::Grammar,
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "missing field `language`".to_string(),
        };
        assert_eq!(err.user_message(), "missing field `language`");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
