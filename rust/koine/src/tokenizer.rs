//! The tokenizer capability — the only seam between the engine and a
//! language's script-specific rules.
//!
//! The matching engine depends on this trait alone; it never inspects a
//! concrete tokenizer. Whatever a language needs — whitespace segmentation,
//! dictionary-driven longest match for no-space scripts, case-suffix
//! stripping — lives entirely behind `tokenize`.

use crate::keyword::NormalizedKeyword;
use crate::token::{TokenKind, TokenStream};

/// One implementation per language.
///
/// Tokenization is deterministic and total: it terminates for any finite
/// input, consumes every non-whitespace character into exactly one token,
/// and never fails — unrecognized characters are skipped, not fatal.
pub trait Tokenizer: Send + Sync {
    /// The language code this tokenizer produces streams for.
    fn language(&self) -> &str;

    /// Convert raw input into an ordered token stream. Empty input yields
    /// an empty stream, not an error.
    fn tokenize(&self, input: &str) -> TokenStream;

    /// Classify a single surface form the way `tokenize` would classify a
    /// standalone word: [`TokenKind::Keyword`] when the keyword table knows
    /// it, [`TokenKind::Identifier`] otherwise.
    fn classify(&self, surface: &str) -> TokenKind {
        if self.lookup_keyword(surface).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    /// O(1) keyword classification; pure, the table never changes after
    /// construction.
    fn lookup_keyword(&self, surface: &str) -> Option<&NormalizedKeyword>;
}
