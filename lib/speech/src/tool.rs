//! Pronunciation tool: synthesize text and store it as a public MP3 clip.

use crate::error::SpeechError;
use crate::language::Language;
use crate::provider::SpeechProvider;
use langbuddy_core::{AudioClipId, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

/// URL prefix under which the audio directory is served.
pub const DEFAULT_PUBLIC_PREFIX: &str = "/static/audio";

/// Attempts at finding an unused file name before giving up.
const MAX_NAME_ATTEMPTS: usize = 8;

/// A stored audio clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Clip identifier, also embedded in the file name.
    pub id: AudioClipId,
    /// Where the clip was written.
    pub file_path: PathBuf,
    /// URL path the clip is served under.
    pub public_path: String,
}

/// Synthesizes speech and writes it under an audio directory.
#[derive(Clone)]
pub struct SpeechTool {
    provider: Arc<dyn SpeechProvider>,
    audio_dir: PathBuf,
    public_prefix: String,
}

impl SpeechTool {
    /// Creates a tool writing into `audio_dir`, served under `/static/audio`.
    #[must_use]
    pub fn new(provider: Arc<dyn SpeechProvider>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            audio_dir: audio_dir.into(),
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
        }
    }

    /// Sets the URL prefix clips are served under.
    #[must_use]
    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the directory clips are written to.
    #[must_use]
    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Synthesizes `text` in the language identified by `language_code` and
    /// stores it as `audio_<hex>.mp3`.
    ///
    /// # Errors
    ///
    /// Returns an error if the language is unsupported, the text is blank,
    /// the provider fails, or the clip cannot be written.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn synthesize(&self, text: &str, language_code: &str) -> Result<AudioClip, SpeechError> {
        let language =
            Language::from_code(language_code).ok_or_else(|| SpeechError::UnsupportedLanguage {
                code: language_code.to_string(),
            })?;
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText.into());
        }

        let audio = self.provider.synthesize(text, language).await?;

        fs::create_dir_all(&self.audio_dir)
            .await
            .map_err(|e| self.storage_error(&self.audio_dir, &e))?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let id = AudioClipId::new();
            let file_name = id.file_name();
            let file_path = self.audio_dir.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(%id, "Audio file name taken; drawing another");
                    continue;
                }
                Err(e) => return Err(self.storage_error(&file_path, &e).into()),
            };

            file.write_all(&audio)
                .await
                .map_err(|e| self.storage_error(&file_path, &e))?;
            file.flush()
                .await
                .map_err(|e| self.storage_error(&file_path, &e))?;

            debug!(%id, bytes = audio.len(), "Audio clip stored");
            return Ok(AudioClip {
                id,
                public_path: format!("{}/{file_name}", self.public_prefix),
                file_path,
            });
        }

        Err(SpeechError::Storage {
            path: self.audio_dir.clone(),
            reason: "no unused file name found".to_string(),
        }
        .into())
    }

    fn storage_error(&self, path: &Path, error: &std::io::Error) -> SpeechError {
        warn!(path = %path.display(), error = %error, "Failed to store audio clip");
        SpeechError::Storage {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    /// Returns fixed bytes and records the requested language codes.
    #[derive(Default)]
    struct StubProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechProvider for StubProvider {
        async fn synthesize(&self, text: &str, language: &Language) -> Result<Bytes, SpeechError> {
            self.calls.lock().unwrap().push(language.code.to_string());
            Ok(Bytes::from(format!("ID3:{text}")))
        }
    }

    fn tool(dir: &Path) -> (SpeechTool, Arc<StubProvider>) {
        let provider = Arc::new(StubProvider::default());
        (SpeechTool::new(provider.clone(), dir.join("audio")), provider)
    }

    fn is_clip_path(path: &str) -> bool {
        path.strip_prefix("/static/audio/audio_")
            .and_then(|rest| rest.strip_suffix(".mp3"))
            .is_some_and(|hex| hex.parse::<AudioClipId>().is_ok())
    }

    #[tokio::test]
    async fn writes_clip_and_returns_public_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tool, provider) = tool(dir.path());

        let clip = tool.synthesize("hola", "es").await.expect("synthesize");

        assert!(is_clip_path(&clip.public_path), "{}", clip.public_path);
        assert_eq!(
            clip.file_path.file_name().and_then(|n| n.to_str()),
            Some(clip.id.file_name().as_str())
        );
        let written = std::fs::read(&clip.file_path).expect("read clip");
        assert_eq!(written, b"ID3:hola");
        assert_eq!(*provider.calls.lock().unwrap(), vec!["es".to_string()]);
    }

    #[tokio::test]
    async fn unsupported_language_skips_the_provider() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tool, provider) = tool(dir.path());

        let err = tool.synthesize("hello", "tlh").await.unwrap_err();

        assert_eq!(
            *err.current_context(),
            SpeechError::UnsupportedLanguage {
                code: "tlh".to_string()
            }
        );
        assert!(provider.calls.lock().unwrap().is_empty());
        assert!(!tool.audio_dir().exists());
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tool, _provider) = tool(dir.path());

        let err = tool.synthesize("   ", "en").await.unwrap_err();
        assert_eq!(*err.current_context(), SpeechError::EmptyText);
    }

    #[tokio::test]
    async fn repeated_calls_produce_distinct_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tool, _provider) = tool(dir.path());

        let first = tool.synthesize("bonjour", "fr").await.expect("first");
        let second = tool.synthesize("bonjour", "fr").await.expect("second");

        assert_ne!(first.file_path, second.file_path);
        assert_eq!(std::fs::read_dir(tool.audio_dir()).expect("dir").count(), 2);
    }

    #[tokio::test]
    async fn custom_prefix_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tool, _provider) = tool(dir.path());
        let tool = tool.with_public_prefix("/media/");

        let clip = tool.synthesize("ciao", "IT").await.expect("synthesize");
        assert!(clip.public_path.starts_with("/media/audio_"));
    }
}
