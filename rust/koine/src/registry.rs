//! The language registry — an explicit map from language codes to
//! {tokenizer, profile, patterns}.
//!
//! The registry is an object constructed at process start and passed by
//! reference to the parsing entry points; there is no ambient singleton.
//! Registration is append-only and idempotent per code: re-registering a
//! code replaces the prior entry, which is the designed mechanism for
//! hot-patching a language's translations without restarting the engine.
//!
//! Parsing is read-only over the registry, so concurrent parses across
//! threads are free. Concurrent registration is the one write path;
//! [`SharedRegistry`] serializes it behind a single-writer/many-readers
//! lock.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::command::CanonicalCommand;
use crate::error::ParseError;
use crate::matcher::match_stream;
use crate::pattern::PatternSet;
use crate::profile::LanguageProfile;
use crate::token::TokenStream;
use crate::tokenizer::Tokenizer;

/// Everything registered for one language.
pub struct RegisteredLanguage {
    pub tokenizer: Box<dyn Tokenizer>,
    pub profile: LanguageProfile,
    pub patterns: PatternSet,
}

/// Process-wide language table, keyed by code, preserving registration
/// order.
#[derive(Default)]
pub struct Registry {
    languages: IndexMap<String, RegisteredLanguage>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register (or replace) a language. The pattern set was validated when
    /// it was built, so nothing here can fail.
    pub fn register_language(
        &mut self,
        tokenizer: Box<dyn Tokenizer>,
        profile: LanguageProfile,
        patterns: PatternSet,
    ) {
        let code = profile.code.clone();
        debug!(language = %code, patterns = patterns.len(), "registering language");
        self.languages.insert(
            code,
            RegisteredLanguage {
                tokenizer,
                profile,
                patterns,
            },
        );
    }

    /// Registered language codes, in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    fn language(&self, code: &str) -> Result<&RegisteredLanguage, ParseError> {
        self.languages
            .get(code)
            .ok_or_else(|| ParseError::UnsupportedLanguage {
                code: code.to_string(),
            })
    }

    pub fn tokenizer(&self, code: &str) -> Result<&dyn Tokenizer, ParseError> {
        Ok(self.language(code)?.tokenizer.as_ref())
    }

    pub fn profile(&self, code: &str) -> Result<&LanguageProfile, ParseError> {
        Ok(&self.language(code)?.profile)
    }

    pub fn patterns(&self, code: &str) -> Result<&PatternSet, ParseError> {
        Ok(&self.language(code)?.patterns)
    }

    /// Tokenize input under a registered language. Exposed for tooling and
    /// debugging; tokenization itself cannot fail.
    pub fn tokenize(&self, input: &str, code: &str) -> Result<TokenStream, ParseError> {
        Ok(self.language(code)?.tokenizer.tokenize(input))
    }

    /// Match an already-tokenized stream, optionally scoped to one command.
    pub fn match_command(
        &self,
        stream: &TokenStream,
        command: Option<&str>,
    ) -> Result<CanonicalCommand, ParseError> {
        let language = self.language(stream.language())?;
        match_stream(stream, &language.patterns, command).map_err(ParseError::NoMatch)
    }

    /// Tokenize and match in one step — the primary entry point.
    pub fn parse(
        &self,
        input: &str,
        code: &str,
        command: Option<&str>,
    ) -> Result<CanonicalCommand, ParseError> {
        let language = self.language(code)?;
        let stream = language.tokenizer.tokenize(input);
        match_stream(&stream, &language.patterns, command).map_err(ParseError::NoMatch)
    }
}

/// A registry shared across threads: many concurrent readers (parses), one
/// writer at a time (registration).
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        SharedRegistry {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register_language(
        &self,
        tokenizer: Box<dyn Tokenizer>,
        profile: LanguageProfile,
        patterns: PatternSet,
    ) {
        self.inner
            .write()
            .register_language(tokenizer, profile, patterns);
    }

    pub fn parse(
        &self,
        input: &str,
        code: &str,
        command: Option<&str>,
    ) -> Result<CanonicalCommand, ParseError> {
        self.inner.read().parse(input, code, command)
    }

    pub fn tokenize(&self, input: &str, code: &str) -> Result<TokenStream, ParseError> {
        self.inner.read().tokenize(input, code)
    }

    /// Run a closure with read access, for accessors beyond parse/tokenize.
    pub fn with<T>(&self, f: impl FnOnce(&Registry) -> T) -> T {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::{KeywordKind, KeywordRow, KeywordTable, NormalizedKeyword};
    use crate::pattern::{LanguagePattern, TemplateToken};
    use crate::profile::{Direction, MarkingStrategy, WordOrder};
    use crate::role::Role;
    use crate::token::{LanguageToken, Span, TokenKind};

    /// A minimal whitespace tokenizer, enough to exercise the registry.
    struct WordTokenizer {
        language: String,
        keywords: KeywordTable,
    }

    impl Tokenizer for WordTokenizer {
        fn language(&self) -> &str {
            &self.language
        }

        fn tokenize(&self, input: &str) -> TokenStream {
            let mut tokens = Vec::new();
            let mut offset = 0;
            for word in input.split_whitespace() {
                let len = word.chars().count();
                let token = match self.keywords.lookup(word) {
                    Some(hit) => LanguageToken::new(
                        word,
                        TokenKind::Keyword,
                        Span::new(offset, offset + len),
                    )
                    .with_normalized(hit.canonical.clone()),
                    None => LanguageToken::new(
                        word,
                        TokenKind::Identifier,
                        Span::new(offset, offset + len),
                    ),
                };
                tokens.push(token);
                offset += len + 1;
            }
            TokenStream::new(self.language.clone(), tokens)
        }

        fn lookup_keyword(&self, surface: &str) -> Option<&NormalizedKeyword> {
            self.keywords.lookup(surface)
        }
    }

    fn test_language(code: &str, toggle_word: &str) -> (Box<dyn Tokenizer>, LanguageProfile, PatternSet) {
        let tokenizer = WordTokenizer {
            language: code.to_string(),
            keywords: KeywordTable::new(vec![KeywordRow::new(
                "toggle",
                KeywordKind::Command,
                &[toggle_word],
            )]),
        };
        let profile = LanguageProfile {
            code: code.to_string(),
            name: code.to_string(),
            native_name: code.to_string(),
            direction: Direction::Ltr,
            word_order: WordOrder::Svo,
            marking: MarkingStrategy::Preposition,
            uses_spaces: true,
            role_markers: vec![],
        };
        let patterns = PatternSet::new(vec![LanguagePattern::new(
            format!("{code}-toggle"),
            code,
            "toggle",
            0,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::role(Role::Patient),
            ],
        )])
        .unwrap();
        (Box::new(tokenizer), profile, patterns)
    }

    #[test]
    fn unregistered_code_is_an_error() {
        let registry = Registry::new();
        let err = registry.parse("toggle .active", "zz", None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedLanguage { code } if code == "zz"
        ));
    }

    #[test]
    fn parse_round_trip() {
        let mut registry = Registry::new();
        let (tokenizer, profile, patterns) = test_language("en", "toggle");
        registry.register_language(tokenizer, profile, patterns);

        let command = registry.parse("toggle .active", "en", None).unwrap();
        assert_eq!(command.command, "toggle");
        assert_eq!(command.role(Role::Patient), Some(".active"));
    }

    #[test]
    fn reregistration_replaces_the_entry() {
        let mut registry = Registry::new();
        let (tokenizer, profile, patterns) = test_language("en", "toggle");
        registry.register_language(tokenizer, profile, patterns);

        // Hot-patch: the same code now recognizes a different spelling.
        let (tokenizer, profile, patterns) = test_language("en", "flip");
        registry.register_language(tokenizer, profile, patterns);

        assert_eq!(registry.codes().count(), 1);
        assert!(registry.parse("flip .active", "en", None).is_ok());

        // The old spelling is no longer in the patched keyword table.
        let stream = registry.tokenize("toggle .active", "en").unwrap();
        assert_eq!(stream[0].kind, TokenKind::Identifier);
        assert_eq!(stream[0].normalized, None);

        // It still parses: an identifier whose surface equals the literal
        // matches by surface fallback.
        assert!(registry.parse("toggle .active", "en", None).is_ok());
    }

    #[test]
    fn shared_registry_parses_across_threads() {
        let mut registry = Registry::new();
        let (tokenizer, profile, patterns) = test_language("en", "toggle");
        registry.register_language(tokenizer, profile, patterns);
        let shared = SharedRegistry::new(registry);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared.parse("toggle .active", "en", None).unwrap()
                })
            })
            .collect();
        for handle in handles {
            let command = handle.join().unwrap();
            assert_eq!(command.command, "toggle");
        }
    }
}
