//! Strongly-typed ID types for domain entities.
//!
//! Message ids use ULID (Universally Unique Lexicographically Sortable
//! Identifier) format. Session keys are opaque strings chosen by the client,
//! and audio clip ids are short random hex tokens used in file names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around ULID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Creates an ID from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let prefix_with_underscore = concat!($prefix, "_");
                let ulid_str = s.strip_prefix(prefix_with_underscore).unwrap_or(s);

                Ulid::from_str(ulid_str)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        reason: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a message within a conversation.
    MessageId,
    "msg"
);

/// Opaque key identifying a conversation session.
///
/// Keys come from the `session_id` form field; an absent field maps to
/// [`SessionKey::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Key used when the client does not name a session.
    pub const DEFAULT: &'static str = "default";

    /// Creates a session key from any string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SessionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Random identifier for a generated audio clip.
///
/// Rendered as exactly eight lowercase hex digits, taken from the random
/// component of a fresh ULID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioClipId(u32);

impl AudioClipId {
    /// Creates a new random clip id.
    #[must_use]
    pub fn new() -> Self {
        // Truncation keeps the low 32 random bits.
        Self(Ulid::new().random() as u32)
    }

    /// Returns the file name used to store the clip.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("audio_{self}.mp3")
    }
}

impl Default for AudioClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AudioClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for AudioClipId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ParseIdError {
                id_type: "AudioClipId",
                reason: format!("expected 8 lowercase hex digits, got '{s}'"),
            });
        }
        u32::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| ParseIdError {
                id_type: "AudioClipId",
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_display_format() {
        let id = MessageId::new();
        assert!(id.to_string().starts_with("msg_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = MessageId::new();
        let parsed: MessageId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: MessageId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let err = "not_a_ulid".parse::<MessageId>().unwrap_err();
        assert_eq!(err.id_type, "MessageId");
    }

    #[test]
    fn session_key_defaults_to_default() {
        assert_eq!(SessionKey::default().as_str(), "default");
    }

    #[test]
    fn session_key_deserializes_from_plain_string() {
        let key: SessionKey = serde_json::from_str("\"tab-42\"").expect("deserialize");
        assert_eq!(key, SessionKey::new("tab-42"));
    }

    #[test]
    fn audio_clip_id_is_eight_hex_digits() {
        for _ in 0..64 {
            let id = AudioClipId::new().to_string();
            assert_eq!(id.len(), 8);
            assert!(id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn audio_clip_file_name() {
        let id: AudioClipId = "00c0ffee".parse().expect("should parse");
        assert_eq!(id.file_name(), "audio_00c0ffee.mp3");
    }

    #[test]
    fn audio_clip_id_rejects_uppercase_and_wrong_length() {
        assert!("00C0FFEE".parse::<AudioClipId>().is_err());
        assert!("abc".parse::<AudioClipId>().is_err());
    }
}
