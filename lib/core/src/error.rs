//! Error handling foundation for langbuddy.
//!
//! This module provides only the `Result` type alias using rootcause.
//! Each crate defines its own domain-specific error enum (`LlmError`,
//! `TaskError`, `ConversationError`, `SpeechError`) and returns
//! `Result<T, ThatError>`. A layer wrapping a lower layer's failure uses
//! `Report::context` so the lower report stays in the chain.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_works() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }

    fn parse_port(raw: &str) -> Result<u16, std::num::ParseIntError> {
        Ok(raw.parse::<u16>()?)
    }

    #[test]
    fn question_mark_wraps_errors_in_a_report() {
        assert_eq!(parse_port("8080").expect("port"), 8080);

        let err = parse_port("http").unwrap_err();
        let expected = "http".parse::<u16>().unwrap_err();
        assert_eq!(err.current_context(), &expected);
    }
}
