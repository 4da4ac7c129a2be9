//! Speech providers.
//!
//! A provider turns text into MP3 bytes. The built-in provider calls the
//! Google Translate TTS endpoint, which accepts short segments only, so long
//! text is split at word boundaries and the returned MP3 segments are
//! concatenated in order.

use crate::error::SpeechError;
use crate::language::Language;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use langbuddy_core::Result;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Google Translate TTS endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Longest segment the endpoint accepts, in characters.
pub const MAX_SEGMENT_CHARS: usize = 100;

/// Synthesizes speech audio.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Returns MP3 audio for `text` spoken in `language`.
    async fn synthesize(&self, text: &str, language: &Language) -> Result<Bytes, SpeechError>;
}

/// Provider backed by the Google Translate TTS endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateTts {
    /// Creates a provider for `endpoint` with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::RequestFailed`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SpeechError::RequestFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch_segment(
        &self,
        segment: &str,
        language: &Language,
        index: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let total = total.to_string();
        let index = index.to_string();
        let text_len = segment.chars().count().to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("q", segment),
                ("tl", language.code),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                status = %status,
                language = language.code,
                "Speech provider returned error status"
            );
            return Err(SpeechError::HttpStatus {
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response.bytes().await.map_err(request_error)?)
    }
}

fn request_error(e: reqwest::Error) -> SpeechError {
    if e.is_timeout() {
        SpeechError::Timeout
    } else {
        SpeechError::RequestFailed {
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleTranslateTts {
    #[instrument(skip_all, fields(language = language.code))]
    async fn synthesize(&self, text: &str, language: &Language) -> Result<Bytes, SpeechError> {
        let segments = split_text(text, MAX_SEGMENT_CHARS);
        if segments.is_empty() {
            return Err(SpeechError::EmptyText.into());
        }

        let mut audio = BytesMut::new();
        for (index, segment) in segments.iter().enumerate() {
            let chunk = self
                .fetch_segment(segment, language, index, segments.len())
                .await?;
            audio.extend_from_slice(&chunk);
        }

        debug!(segments = segments.len(), bytes = audio.len(), "Speech synthesized");
        Ok(audio.freeze())
    }
}

/// Splits `text` into segments of at most `max_chars` characters.
///
/// Words are packed greedily and joined by a single space. A word longer
/// than `max_chars` is cut at character boundaries.
#[must_use]
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                segments.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}/translate_tts")
    }

    /// Answers each segment with `[idx:q]` so concatenation order is visible.
    async fn tagged_segment(
        State(queries): State<Queries>,
        Query(query): Query<HashMap<String, String>>,
    ) -> String {
        let tag = format!(
            "[{}:{}]",
            query.get("idx").map_or("?", String::as_str),
            query.get("q").map_or("", String::as_str)
        );
        queries.lock().unwrap().push(query);
        tag
    }

    fn spanish() -> Language {
        *Language::from_code("es").expect("supported")
    }

    #[test]
    fn short_text_is_one_segment() {
        assert_eq!(split_text("  hola   mundo ", 100), vec!["hola mundo"]);
    }

    #[test]
    fn blank_text_has_no_segments() {
        assert!(split_text(" \n\t ", 100).is_empty());
    }

    #[test]
    fn splits_at_word_boundaries() {
        let segments = split_text("aaa bbb ccc ddd", 7);
        assert_eq!(segments, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn long_words_are_cut_on_char_boundaries() {
        let segments = split_text("ab ñññññ cd", 3);
        assert_eq!(segments, vec!["ab", "ñññ", "ññ", "cd"]);
    }

    #[test]
    fn segments_never_exceed_the_limit() {
        let text = "Le renard brun rapide saute par-dessus le chien paresseux. ".repeat(12);
        let segments = split_text(&text, MAX_SEGMENT_CHARS);
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|s| s.chars().count() <= MAX_SEGMENT_CHARS));
        assert_eq!(segments.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[tokio::test]
    async fn long_text_is_fetched_in_segments_and_concatenated_in_order() {
        let queries = Queries::default();
        let router = Router::new()
            .route("/translate_tts", get(tagged_segment))
            .with_state(queries.clone());
        let tts = GoogleTranslateTts::new(spawn_stub(router).await, Duration::from_secs(5))
            .expect("provider");
        let text = "palabra ".repeat(20);
        let segments = split_text(&text, MAX_SEGMENT_CHARS);
        assert_eq!(segments.len(), 2);

        let audio = tts.synthesize(&text, &spanish()).await.expect("synthesize");

        assert_eq!(
            audio,
            Bytes::from(format!("[0:{}][1:{}]", segments[0], segments[1]))
        );
        let queries = queries.lock().unwrap().clone();
        assert_eq!(queries.len(), 2);
        for (index, query) in queries.iter().enumerate() {
            assert_eq!(query["ie"], "UTF-8");
            assert_eq!(query["client"], "tw-ob");
            assert_eq!(query["tl"], "es");
            assert_eq!(query["total"], "2");
            assert_eq!(query["idx"], index.to_string());
            assert_eq!(query["q"], segments[index]);
            assert_eq!(query["textlen"], segments[index].chars().count().to_string());
        }
    }

    #[tokio::test]
    async fn error_status_stops_synthesis() {
        let router = Router::new().route(
            "/translate_tts",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        );
        let tts = GoogleTranslateTts::new(spawn_stub(router).await, Duration::from_secs(5))
            .expect("provider");

        let err = tts.synthesize("hola", &spanish()).await.unwrap_err();

        assert_eq!(err.current_context(), &SpeechError::HttpStatus { status: 500 });
    }

    #[tokio::test]
    async fn slow_segment_times_out() {
        let router = Router::new().route(
            "/translate_tts",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let tts = GoogleTranslateTts::new(spawn_stub(router).await, Duration::from_millis(100))
            .expect("provider");

        let err = tts.synthesize("hola", &spanish()).await.unwrap_err();

        assert_eq!(err.current_context(), &SpeechError::Timeout);
    }

    #[tokio::test]
    async fn blank_text_sends_no_request() {
        let tts = GoogleTranslateTts::new("http://127.0.0.1:9/translate_tts", Duration::from_secs(1))
            .expect("provider");

        let err = tts.synthesize("   ", &spanish()).await.unwrap_err();

        assert_eq!(err.current_context(), &SpeechError::EmptyText);
    }
}
