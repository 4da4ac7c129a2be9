//! Shared application state.
//!
//! External clients are built once at startup and handed to every handler
//! through axum state. When the Groq API key is missing the server still
//! starts; every tool route then answers with an error fragment.

use crate::config::ServerConfig;
use crate::error::{RouteError, Tool};
use langbuddy_ai::groq::API_KEY_VARIABLE;
use langbuddy_ai::{
    ConversationStarterTool, GrammarTool, GroqBackend, GroqConfig, LlmBackend, LlmError,
    TranslationTool,
};
use langbuddy_conversation::{ChatOrchestrator, SessionStore};
use langbuddy_speech::{GoogleTranslateTts, SpeechProvider, SpeechTool};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// The language tools handlers call into.
pub struct Services {
    pub translator: TranslationTool,
    pub grammar: GrammarTool,
    pub roleplay: ConversationStarterTool,
    pub speech: SpeechTool,
    pub orchestrator: ChatOrchestrator,
}

impl Services {
    /// Builds every tool over the given providers.
    #[must_use]
    pub fn new(
        backend: Arc<dyn LlmBackend>,
        speech: Arc<dyn SpeechProvider>,
        audio_dir: impl Into<PathBuf>,
        retention_cap: usize,
    ) -> Self {
        let sessions = Arc::new(SessionStore::with_capacity(retention_cap));
        Self {
            translator: TranslationTool::new(Arc::clone(&backend)),
            grammar: GrammarTool::new(Arc::clone(&backend)),
            roleplay: ConversationStarterTool::new(Arc::clone(&backend)),
            speech: SpeechTool::new(speech, audio_dir),
            orchestrator: ChatOrchestrator::new(backend, sessions),
        }
    }
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    services: Result<Arc<Services>, Arc<str>>,
}

impl AppState {
    /// Creates state around ready services.
    #[must_use]
    pub fn with_services(services: Services) -> Self {
        Self {
            services: Ok(Arc::new(services)),
        }
    }

    /// Creates state whose tool routes all fail with `reason`.
    #[must_use]
    pub fn unavailable(reason: impl Into<Arc<str>>) -> Self {
        Self {
            services: Err(reason.into()),
        }
    }

    /// Builds the Groq backend and speech provider from configuration.
    ///
    /// Construction failures, including a missing API key, leave the state
    /// unavailable rather than aborting startup.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let Some(api_key) = config.api_key() else {
            let reason = LlmError::MissingCredential {
                variable: API_KEY_VARIABLE.to_string(),
            };
            return Self::unavailable(format!("{reason}. Please set your Groq API key."));
        };

        let groq = GroqConfig::new(api_key)
            .with_base_url(config.llm.base_url.clone())
            .with_model(config.llm.model.clone())
            .with_request_timeout(config.llm.request_timeout());
        let backend = match GroqBackend::new(groq) {
            Ok(backend) => backend,
            Err(report) => {
                return Self::unavailable(format!(
                    "Failed to initialize tools: {}",
                    report.current_context()
                ));
            }
        };
        info!(
            model = backend.model(),
            base_url = %config.llm.base_url,
            "Language model backend ready"
        );

        let speech = match GoogleTranslateTts::new(
            config.speech.endpoint.clone(),
            config.speech.request_timeout(),
        ) {
            Ok(speech) => speech,
            Err(report) => {
                return Self::unavailable(format!(
                    "Failed to initialize tools: {}",
                    report.current_context()
                ));
            }
        };

        Self::with_services(Services::new(
            Arc::new(backend),
            Arc::new(speech),
            config.audio_dir(),
            config.session.retention_cap,
        ))
    }

    /// Returns why the tools are unavailable, if they are.
    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.services.as_ref().err().map(|reason| &**reason)
    }

    /// Returns the services for a request routed to `tool`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Unavailable`] if startup could not build them.
    pub fn services(&self, tool: Tool) -> Result<&Services, RouteError> {
        self.services
            .as_deref()
            .map_err(|reason| RouteError::Unavailable {
                tool,
                reason: reason.to_string(),
            })
    }
}
