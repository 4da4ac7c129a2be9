//! Prompt templates for the language tools.
//!
//! Templates use `{{variable_name}}` placeholders and are rendered in a
//! single pass, so user text that happens to contain `{{...}}` is never
//! substituted a second time.

use crate::error::PromptError;

/// A named prompt template with `{{variable}}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Template name, used in error messages.
    pub name: &'static str,
    /// Template content with placeholders.
    pub content: &'static str,
}

impl PromptTemplate {
    /// Creates a template.
    #[must_use]
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    /// Renders the template with the given variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no matching variable or a
    /// placeholder is never closed.
    pub fn render(&self, variables: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut output = String::with_capacity(self.content.len());
        let mut rest = self.content;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| PromptError::Unterminated {
                template: self.name.to_string(),
            })?;
            let name = &after[..end];
            let value = variables
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| PromptError::MissingVariable {
                    template: self.name.to_string(),
                    variable: name.to_string(),
                })?;
            output.push_str(value);
            rest = &after[end + 2..];
        }
        output.push_str(rest);

        Ok(output)
    }
}

/// Single-shot translation prompt.
pub const TRANSLATION: PromptTemplate = PromptTemplate::new(
    "translation",
    "Translate this text from {{src_lang}} to {{tgt_lang}}:\n\n{{text}}\n\nTranslation:",
);

/// Single-shot grammar correction prompt.
pub const GRAMMAR: PromptTemplate = PromptTemplate::new(
    "grammar",
    "Correct this sentence in {{language}}. Also explain the correction briefly in English.\n\n\
     Original: {{text}}\n\nCorrected:",
);

/// Single-shot roleplay opener.
pub const ROLEPLAY: PromptTemplate = PromptTemplate::new(
    "roleplay",
    "You are a {{language}} tutor. Roleplay a short conversation.\n\
     Keep sentences simple and encourage the learner to respond.\n\
     The conversation should be educational and engaging.\n\n\
     User prompt: {{prompt}}\n\nStart the conversation:",
);

/// System framing stored at the head of a guided conversation.
pub const TUTOR_SYSTEM: PromptTemplate = PromptTemplate::new(
    "tutor_system",
    "You are a {{language}} language tutor. Start a conversation about: {{topic}}\n\n\
     Keep the conversation simple and educational. Ask questions to encourage the learner to respond.\n\
     Start with a greeting and the first question or statement about the topic.\n\
     Keep responses short and encourage participation.",
);

/// System prompt prepended to every open-chat call.
pub const CHAT_SYSTEM: &str = "You are a helpful language learning assistant. You have access to these tools:
1. Translation: Translate text between languages
2. Grammar Correction: Correct grammar and explain errors
3. Pronunciation: Generate audio pronunciation
4. Conversation Practice: Create roleplay conversations

When users ask for specific tasks, guide them to use the appropriate tool. For general language learning questions, provide helpful advice.";
