//! Languages accepted by the speech synthesizer.

/// A language the synthesizer can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Language code sent to the provider.
    pub code: &'static str,
    /// English display name.
    pub name: &'static str,
}

/// Supported languages, in display order.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ur", name: "Urdu" },
];

impl Language {
    /// Looks up a language by code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_code(code: &str) -> Option<&'static Language> {
        let code = code.trim();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|language| language.code.eq_ignore_ascii_case(code))
    }

    /// Returns the display name for a code, or the code itself when unknown.
    #[must_use]
    pub fn display_name(code: &str) -> &str {
        Self::from_code(code).map_or(code, |language| language.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Language::from_code(" ES ").map(|l| l.name), Some("Spanish"));
        assert!(Language::from_code("xx").is_none());
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SUPPORTED_LANGUAGES.len());
    }

    #[test]
    fn display_name_falls_back_to_code() {
        assert_eq!(Language::display_name("ja"), "Japanese");
        assert_eq!(Language::display_name("Klingon"), "Klingon");
    }
}
