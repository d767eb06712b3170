//! Parse-time error taxonomy.
//!
//! Tokenization never fails — unrecognized characters are skipped so the
//! matcher stays robust to punctuation and noise. All failure surfaces at
//! the matching stage as a typed result: either the language was never
//! registered, or no pattern matched (with the full attempted-candidate
//! diagnostic). Registration-time rejection lives in
//! [`PatternError`](crate::pattern::PatternError).

use thiserror::Error;

use crate::matcher::MatchFailure;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The language code is not in the registry. Always surfaced to the
    /// caller, never silently defaulted to a fallback language.
    #[error("unsupported language '{code}'")]
    UnsupportedLanguage { code: String },

    /// Tokenization succeeded but no pattern matched. The failure carries
    /// the ordered list of attempted candidates and where each one stopped.
    #[error("{0}")]
    NoMatch(MatchFailure),
}

impl ParseError {
    /// The diagnostic, when this is a [`ParseError::NoMatch`].
    pub fn match_failure(&self) -> Option<&MatchFailure> {
        match self {
            ParseError::NoMatch(failure) => Some(failure),
            ParseError::UnsupportedLanguage { .. } => None,
        }
    }
}
