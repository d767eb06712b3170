//! Shared scanning toolkit — the sub-scanners every tokenizer composes.
//!
//! A concrete tokenizer owns its character classes, keyword table, and
//! particle/suffix handling, but selectors, string literals, numbers,
//! URLs, and variable sigils look the same in every language. Those
//! sub-scanners live here, over a simple char [`Cursor`].
//!
//! Each sub-scanner either consumes a complete token and returns it, or
//! consumes nothing and returns `None` so the caller can try the next
//! alternative. That protocol is what makes tokenization total: a failed
//! sub-scan never leaves the cursor mid-token.

use crate::token::{LanguageToken, Span, TokenKind};

/// A char-indexed cursor over the input.
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Cursor {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    pub fn advance_by(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.chars.len());
    }

    /// Rewind to an earlier position. Sub-scanners use this to back out of
    /// a failed attempt without consuming anything.
    pub fn reset_to(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// The text between two char positions.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Whether the input at the cursor starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek_at(i) == Some(ch))
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume a maximal run of chars satisfying `pred`, returning the run
    /// and its span. Empty runs return `None`.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> Option<(String, Span)> {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some((self.slice(start, self.pos), Span::new(start, self.pos)))
    }
}

/// Default selector body characters: ASCII identifier chars. Languages with
/// attached case suffixes widen this to include their own letters (Turkish
/// `.activei`, `.menüye`).
pub fn is_ascii_selector_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Single-character operators and punctuation common to every pack.
pub fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' | ',' | ';' | '(' | ')' | '&' | '|' | '@'
    )
}

/// CSS selector: `#id`, `.class`, or `[attr=value]`.
///
/// `body` decides which characters may follow the `#`/`.` sigil. A sigil
/// with an empty body, or an unterminated `[` selector, consumes nothing
/// (the caller falls back to identifier scanning).
pub fn scan_selector(
    cursor: &mut Cursor,
    body: impl Fn(char) -> bool,
) -> Option<LanguageToken> {
    let start = cursor.pos();
    match cursor.peek()? {
        '#' | '.' => {
            cursor.advance();
            let mut any = false;
            while cursor.peek().is_some_and(&body) {
                cursor.advance();
                any = true;
            }
            if !any {
                cursor.reset_to(start);
                return None;
            }
            let surface = cursor.slice(start, cursor.pos());
            Some(LanguageToken::new(
                surface,
                TokenKind::Selector,
                Span::new(start, cursor.pos()),
            ))
        }
        '[' => {
            cursor.advance();
            while let Some(ch) = cursor.peek() {
                cursor.advance();
                if ch == ']' {
                    let surface = cursor.slice(start, cursor.pos());
                    return Some(LanguageToken::new(
                        surface,
                        TokenKind::Selector,
                        Span::new(start, cursor.pos()),
                    ));
                }
            }
            cursor.reset_to(start);
            None
        }
        _ => None,
    }
}

/// Quoted string literal; `normalized` carries the unquoted content.
/// Unterminated strings consume nothing.
pub fn scan_string(cursor: &mut Cursor) -> Option<LanguageToken> {
    let start = cursor.pos();
    let quote = match cursor.peek()? {
        q @ ('"' | '\'') => q,
        _ => return None,
    };
    cursor.advance();
    let content_start = cursor.pos();
    while let Some(ch) = cursor.peek() {
        if ch == quote {
            let content = cursor.slice(content_start, cursor.pos());
            cursor.advance();
            let surface = cursor.slice(start, cursor.pos());
            return Some(
                LanguageToken::new(surface, TokenKind::String, Span::new(start, cursor.pos()))
                    .with_normalized(content),
            );
        }
        cursor.advance();
    }
    cursor.reset_to(start);
    None
}

const DURATION_UNITS: [(&str, f64); 4] = [
    ("ms", 1.0),
    ("s", 1000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Numeric literal: digits with an optional fraction, a leading `-` only
/// when a digit follows, and an optional duration unit suffix (`ms`, `s`,
/// `m`, `h`). Durations normalize to canonical milliseconds ("2s" → "2000").
pub fn scan_number(cursor: &mut Cursor) -> Option<LanguageToken> {
    let start = cursor.pos();
    let mut offset = 0;
    if cursor.peek() == Some('-') {
        offset = 1;
    }
    if !cursor.peek_at(offset).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    cursor.advance_by(offset);
    while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        cursor.advance();
    }
    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.advance();
        while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            cursor.advance();
        }
    }
    let digits_end = cursor.pos();

    // Longest unit first so "ms" is not read as "m".
    let mut unit_factor = None;
    for (unit, factor) in DURATION_UNITS {
        if cursor.starts_with(unit) {
            let after = cursor.peek_at(unit.chars().count());
            if !after.is_some_and(|c| c.is_alphanumeric()) {
                cursor.advance_by(unit.chars().count());
                unit_factor = Some(factor);
                break;
            }
        }
    }

    let surface = cursor.slice(start, cursor.pos());
    let span = Span::new(start, cursor.pos());
    let token = LanguageToken::new(surface, TokenKind::Number, span);
    match unit_factor {
        Some(factor) => {
            let digits = cursor.slice(start, digits_end);
            // The digit run always parses; keep the surface on the off chance.
            let millis = digits.parse::<f64>().map(|n| n * factor);
            match millis {
                Ok(ms) if ms.fract() == 0.0 => Some(token.with_normalized(format!("{}", ms as i64))),
                Ok(ms) => Some(token.with_normalized(format!("{ms}"))),
                Err(_) => Some(token),
            }
        }
        None => Some(token),
    }
}

/// URL heuristic: `http://`, `https://`, or a `www.` run, consumed to the
/// next whitespace or quote.
pub fn scan_url(cursor: &mut Cursor) -> Option<LanguageToken> {
    let start = cursor.pos();
    let is_url_start = cursor.starts_with("http://")
        || cursor.starts_with("https://")
        || cursor.starts_with("www.");
    if !is_url_start {
        return None;
    }
    while cursor
        .peek()
        .is_some_and(|c| !c.is_whitespace() && c != '"' && c != '\'')
    {
        cursor.advance();
    }
    let surface = cursor.slice(start, cursor.pos());
    Some(LanguageToken::new(
        surface,
        TokenKind::Url,
        Span::new(start, cursor.pos()),
    ))
}

/// Variable reference sigil: `:name`. The surface keeps the sigil, the
/// normalized value is the bare name.
pub fn scan_sigil(cursor: &mut Cursor) -> Option<LanguageToken> {
    let start = cursor.pos();
    if cursor.peek() != Some(':') {
        return None;
    }
    if !cursor
        .peek_at(1)
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        return None;
    }
    cursor.advance();
    let name_start = cursor.pos();
    while cursor
        .peek()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        cursor.advance();
    }
    let name = cursor.slice(name_start, cursor.pos());
    let surface = cursor.slice(start, cursor.pos());
    Some(
        LanguageToken::new(surface, TokenKind::Identifier, Span::new(start, cursor.pos()))
            .with_normalized(name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(input: &str) -> Cursor {
        Cursor::new(input)
    }

    #[test]
    fn selector_id_and_class() {
        let mut c = cursor("#button rest");
        let token = scan_selector(&mut c, is_ascii_selector_char).unwrap();
        assert_eq!(token.surface, "#button");
        assert_eq!(token.kind, TokenKind::Selector);
        assert_eq!(c.pos(), 7);

        let mut c = cursor(".active");
        assert_eq!(
            scan_selector(&mut c, is_ascii_selector_char).unwrap().surface,
            ".active"
        );
    }

    #[test]
    fn selector_attribute_form() {
        let mut c = cursor("[data-open=true] x");
        let token = scan_selector(&mut c, is_ascii_selector_char).unwrap();
        assert_eq!(token.surface, "[data-open=true]");
    }

    #[test]
    fn unterminated_attribute_selector_consumes_nothing() {
        let mut c = cursor("[data-open");
        assert!(scan_selector(&mut c, is_ascii_selector_char).is_none());
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn bare_sigil_is_not_a_selector() {
        let mut c = cursor("# heading");
        assert!(scan_selector(&mut c, is_ascii_selector_char).is_none());
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn string_literal_normalizes_content() {
        let mut c = cursor("\"hello there\" rest");
        let token = scan_string(&mut c).unwrap();
        assert_eq!(token.surface, "\"hello there\"");
        assert_eq!(token.normalized.as_deref(), Some("hello there"));
    }

    #[test]
    fn unterminated_string_consumes_nothing() {
        let mut c = cursor("\"oops");
        assert!(scan_string(&mut c).is_none());
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn plain_number() {
        let mut c = cursor("42 rest");
        let token = scan_number(&mut c).unwrap();
        assert_eq!(token.surface, "42");
        assert_eq!(token.normalized, None);
    }

    #[test]
    fn negative_number_requires_digit() {
        let mut c = cursor("-7");
        assert_eq!(scan_number(&mut c).unwrap().surface, "-7");

        let mut c = cursor("-x");
        assert!(scan_number(&mut c).is_none());
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn duration_normalizes_to_milliseconds() {
        for (input, expected) in [("2s", "2000"), ("150ms", "150"), ("1.5s", "1500"), ("1m", "60000"), ("2h", "7200000")] {
            let mut c = cursor(input);
            let token = scan_number(&mut c).unwrap();
            assert_eq!(token.normalized.as_deref(), Some(expected), "for {input}");
            assert_eq!(token.surface, input);
        }
    }

    #[test]
    fn unit_must_end_the_word() {
        // "2seconds" is a number followed by an identifier, not a duration.
        let mut c = cursor("2seconds");
        let token = scan_number(&mut c).unwrap();
        assert_eq!(token.surface, "2");
        assert_eq!(token.normalized, None);
    }

    #[test]
    fn url_forms() {
        for input in ["https://example.com/x?q=1", "http://a.b", "www.example.com"] {
            let mut c = cursor(input);
            let token = scan_url(&mut c).unwrap();
            assert_eq!(token.surface, input);
            assert_eq!(token.kind, TokenKind::Url);
        }
    }

    #[test]
    fn sigil_strips_colon_in_normalized() {
        let mut c = cursor(":count rest");
        let token = scan_sigil(&mut c).unwrap();
        assert_eq!(token.surface, ":count");
        assert_eq!(token.normalized.as_deref(), Some("count"));
        assert_eq!(token.kind, TokenKind::Identifier);
    }

    #[test]
    fn lone_colon_is_not_a_sigil() {
        let mut c = cursor(": x");
        assert!(scan_sigil(&mut c).is_none());
    }
}
