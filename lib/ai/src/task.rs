//! Single-shot language tools.
//!
//! Each tool renders one prompt from user input, sends it as a lone user
//! message, and returns the trimmed completion text.

use crate::backend::{CREATIVE_TEMPERATURE, LlmBackend, LlmRequest, PRECISE_TEMPERATURE};
use crate::error::TaskError;
use crate::prompt::{GRAMMAR, PromptTemplate, ROLEPLAY, TRANSLATION};
use langbuddy_core::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

async fn run_single_shot(
    backend: &dyn LlmBackend,
    template: &PromptTemplate,
    variables: &[(&str, &str)],
    temperature: f32,
) -> Result<String, TaskError> {
    let prompt = template.render(variables).map_err(TaskError::Prompt)?;
    let request = LlmRequest::prompt(prompt).with_temperature(temperature);

    let response = backend
        .complete(&request)
        .await
        .map_err(|report| {
            let source = report.current_context().clone();
            report.context(TaskError::Llm(source))
        })?;

    debug!(
        template = template.name,
        output_tokens = response.usage.output_tokens,
        "Task completed"
    );
    Ok(response.content.trim().to_string())
}

/// Translates text between two languages.
#[derive(Clone)]
pub struct TranslationTool {
    backend: Arc<dyn LlmBackend>,
}

impl TranslationTool {
    /// Creates a translation tool over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Translates `text` from `src_lang` to `tgt_lang`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn translate(
        &self,
        text: &str,
        src_lang: &str,
        tgt_lang: &str,
    ) -> Result<String, TaskError> {
        run_single_shot(
            self.backend.as_ref(),
            &TRANSLATION,
            &[("src_lang", src_lang), ("tgt_lang", tgt_lang), ("text", text)],
            PRECISE_TEMPERATURE,
        )
        .await
    }
}

/// Corrects grammar and explains the correction.
#[derive(Clone)]
pub struct GrammarTool {
    backend: Arc<dyn LlmBackend>,
}

impl GrammarTool {
    /// Creates a grammar tool over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Corrects `text` written in `language`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn correct(&self, text: &str, language: &str) -> Result<String, TaskError> {
        run_single_shot(
            self.backend.as_ref(),
            &GRAMMAR,
            &[("language", language), ("text", text)],
            PRECISE_TEMPERATURE,
        )
        .await
    }
}

/// Produces a one-shot roleplay opener for a topic.
#[derive(Clone)]
pub struct ConversationStarterTool {
    backend: Arc<dyn LlmBackend>,
}

impl ConversationStarterTool {
    /// Creates a conversation starter over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Starts a short roleplay in `language` about `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    #[instrument(skip(self, prompt))]
    pub async fn start(&self, prompt: &str, language: &str) -> Result<String, TaskError> {
        run_single_shot(
            self.backend.as_ref(),
            &ROLEPLAY,
            &[("language", language), ("prompt", prompt)],
            CREATIVE_TEMPERATURE,
        )
        .await
    }
}
