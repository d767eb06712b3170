//! Token and position model — the immutable value types every other layer
//! consumes.
//!
//! A [`LanguageToken`] is a classified, positioned unit of input text. It is
//! produced exactly once by a tokenizer and then read by the matcher; nothing
//! mutates a token after it exists. The [`TokenStream`] wraps the ordered
//! token sequence together with the language code of the tokenizer that
//! produced it, so downstream consumers never have to guess which language's
//! rules shaped the stream.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open character range `[start, end)` into the original input.
///
/// Offsets count `char`s, not bytes, so spans remain meaningful for
/// non-ASCII scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The closed set of token classifications.
///
/// Tokenization is total: every character position of the input is assigned
/// to exactly one token of one of these kinds, or skipped as insignificant
/// whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A word present in the language's keyword table (command word, role
    /// marker, or noise word); carries a normalized canonical value.
    Keyword,
    /// An alphabetic/alphanumeric run not found in the keyword table.
    Identifier,
    /// A single-character operator or a grammatical particle.
    Operator,
    /// A CSS selector: `#id`, `.class`, or `[attr=value]`.
    Selector,
    /// A quoted string literal; `normalized` holds the unquoted content.
    String,
    /// A numeric literal, optionally with a duration unit suffix;
    /// `normalized` holds the canonical (milliseconds) value for durations.
    Number,
    /// A URL (`http://`, `https://`, or a `www.` run).
    Url,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Selector => "selector",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Url => "url",
        };
        write!(f, "{name}")
    }
}

/// A single classified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageToken {
    /// The original text of the token, exactly as it appeared in the input.
    pub surface: String,
    /// The token's classification.
    pub kind: TokenKind,
    /// Where in the input the token came from.
    pub span: Span,
    /// The canonical value, when one exists: the normalized command/role
    /// name for keywords, the stem for suffix-stripped tokens, the unquoted
    /// content for strings, canonical milliseconds for durations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl LanguageToken {
    pub fn new(surface: impl Into<String>, kind: TokenKind, span: Span) -> Self {
        LanguageToken {
            surface: surface.into(),
            kind,
            span,
            normalized: None,
        }
    }

    pub fn with_normalized(mut self, normalized: impl Into<String>) -> Self {
        self.normalized = Some(normalized.into());
        self
    }

    /// The value the matcher compares and extracts: `normalized` when
    /// present, else the surface form.
    pub fn value(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.surface)
    }
}

impl fmt::Display for LanguageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.normalized {
            Some(n) => write!(f, "{}({:?}={n:?})", self.kind, self.surface),
            None => write!(f, "{}({:?})", self.kind, self.surface),
        }
    }
}

/// An ordered, indexable, read-only sequence of tokens plus the language
/// code of the tokenizer that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    language: String,
    tokens: Vec<LanguageToken>,
}

impl TokenStream {
    pub fn new(language: impl Into<String>, tokens: Vec<LanguageToken>) -> Self {
        TokenStream {
            language: language.into(),
            tokens,
        }
    }

    /// The language code of the producing tokenizer.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LanguageToken> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[LanguageToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageToken> {
        self.tokens.iter()
    }
}

impl std::ops::Index<usize> for TokenStream {
    type Output = LanguageToken;

    fn index(&self, index: usize) -> &LanguageToken {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a LanguageToken;
    type IntoIter = std::slice::Iter<'a, LanguageToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_prefers_normalized() {
        let token = LanguageToken::new("切り替え", TokenKind::Keyword, Span::new(0, 4))
            .with_normalized("toggle");
        assert_eq!(token.value(), "toggle");
        assert_eq!(token.surface, "切り替え");
    }

    #[test]
    fn value_falls_back_to_surface() {
        let token = LanguageToken::new("#button", TokenKind::Selector, Span::new(0, 7));
        assert_eq!(token.value(), "#button");
    }

    #[test]
    fn stream_is_indexable() {
        let stream = TokenStream::new(
            "en",
            vec![
                LanguageToken::new("toggle", TokenKind::Keyword, Span::new(0, 6)),
                LanguageToken::new(".active", TokenKind::Selector, Span::new(7, 14)),
            ],
        );
        assert_eq!(stream.len(), 2);
        assert_eq!(stream[1].surface, ".active");
        assert_eq!(stream.language(), "en");
    }
}
