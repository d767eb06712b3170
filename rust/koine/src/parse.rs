//! The public parse surface consumed by the downstream interpreter.
//!
//! Free functions over an explicit [`Registry`] handle. They add nothing to
//! the registry's own methods; they exist so the interpreter boundary is a
//! flat, stable set of signatures.

use crate::command::CanonicalCommand;
use crate::error::ParseError;
use crate::registry::Registry;
use crate::token::TokenStream;

/// Recognize a native-language command and normalize it to its canonical
/// form. `command` scopes matching to one command's patterns when the
/// caller already knows which command it expects.
pub fn parse(
    registry: &Registry,
    input: &str,
    language: &str,
    command: Option<&str>,
) -> Result<CanonicalCommand, ParseError> {
    registry.parse(input, language, command)
}

/// Tokenize input under a registered language without matching. Exposed for
/// tooling and debugging (benchmark runners, language-pack authors).
pub fn tokenize(
    registry: &Registry,
    input: &str,
    language: &str,
) -> Result<TokenStream, ParseError> {
    registry.tokenize(input, language)
}
