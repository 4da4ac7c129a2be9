//! Centralized server configuration.
//!
//! Configuration is loaded via the `config` crate from an optional
//! `langbuddy.toml` in the working directory, then from environment
//! variables. Nested keys use `__` as the separator, so
//! `SERVER__BIND_ADDR` sets `server.bind_addr`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use langbuddy_ai::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use langbuddy_conversation::RETENTION_CAP;
use langbuddy_speech::provider::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Name of the optional configuration file, without extension.
pub const CONFIG_FILE: &str = "langbuddy";

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Groq API key, read from `GROQ_API_KEY`.
    #[serde(default)]
    pub groq_api_key: Option<String>,

    /// HTTP listener configuration.
    #[serde(default)]
    pub server: HttpConfig,

    /// Language model configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech synthesis configuration.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`. Generated audio goes in its
    /// `audio` subdirectory.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

/// Language model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model used for every task.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Upper bound on one provider round-trip, in seconds.
    #[serde(default = "default_llm_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Speech synthesis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Text-to-speech endpoint.
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Upper bound on one segment request, in seconds.
    #[serde(default = "default_speech_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Messages retained per session.
    #[serde(default = "default_retention_cap")]
    pub retention_cap: usize,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_llm_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_llm_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_llm_timeout_seconds() -> u64 {
    60
}

fn default_speech_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_speech_timeout_seconds() -> u64 {
    30
}

fn default_retention_cap() -> usize {
    RETENTION_CAP
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            request_timeout_seconds: default_llm_timeout_seconds(),
        }
    }
}

impl LlmConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            request_timeout_seconds: default_speech_timeout_seconds(),
        }
    }
}

impl SpeechConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retention_cap: default_retention_cap(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from `langbuddy.toml` (if present) and
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name(CONFIG_FILE).required(false))
                .add_source(
                    config::Environment::default()
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    /// Builds and deserializes configuration from the given sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but cannot be parsed.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// Returns the Groq API key, treating a blank value as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.groq_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Directory generated audio clips are written to.
    #[must_use]
    pub fn audio_dir(&self) -> PathBuf {
        self.server.static_dir.join("audio")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn defaults_match_documented_values() {
        let config = ServerConfig::from_builder(config::Config::builder()).expect("config");

        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.speech.request_timeout_seconds, 30);
        assert_eq!(config.session.retention_cap, 20);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let toml = r#"
            groq_api_key = "gsk_test"

            [server]
            bind_addr = "0.0.0.0:9000"
            static_dir = "/srv/langbuddy/static"

            [session]
            retention_cap = 40
        "#;
        let config = ServerConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .expect("config");

        assert_eq!(config.api_key(), Some("gsk_test"));
        assert_eq!(config.server.bind_addr.port(), 9000);
        assert_eq!(
            config.audio_dir(),
            PathBuf::from("/srv/langbuddy/static/audio")
        );
        assert_eq!(config.session.retention_cap, 40);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn blank_api_key_is_treated_as_unset() {
        let config = ServerConfig {
            groq_api_key: Some("   ".to_string()),
            ..ServerConfig::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn unparseable_values_are_rejected() {
        let toml = r#"
            [server]
            bind_addr = "not an address"
        "#;
        let result = ServerConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        );
        assert!(result.is_err());
    }
}
