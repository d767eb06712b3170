//! # Koine — multilingual command recognition
//!
//! A command written in natural-language-like syntax in any registered
//! human language is recognized and normalized to one canonical command
//! representation, ready for a downstream scripting interpreter:
//! `"toggle .active on #button"`, `"#button の .active を 切り替え"`, and
//! `".activei tıklamade değiştir"` all become the same `toggle` command
//! with the same semantic roles.
//!
//! ## Architecture
//!
//! ```text
//! Input → Tokenizer (per language) → TokenStream
//!   → Pattern Matching (priority-ordered templates)
//!     → Role Extraction → CanonicalCommand
//! ```
//!
//! - [`token`] — the immutable token and position model.
//! - [`scan`] — shared sub-scanners (selectors, strings, numbers, URLs)
//!   that concrete tokenizers compose.
//! - [`keyword`] — O(1) keyword lookup over a language's native spellings.
//! - [`tokenizer`] — the capability trait a language implements; the engine
//!   never sees a concrete tokenizer.
//! - [`profile`] — static per-language metadata (word order, script
//!   direction, marking strategy).
//! - [`pattern`] — declarative templates plus extraction rules; the serde
//!   shape is a stable interchange format for external generators.
//! - [`matcher`] — the priority-ordered matching and extraction engine.
//! - [`registry`] — explicit language registry; no ambient singletons.
//! - [`parse`] — the flat API surface for the interpreter boundary.
//! - [`detect`] — keyword-hit language scoring for scanners and bundlers.
//!
//! The engine is a pure, synchronous computation: no I/O, no suspension,
//! matching bounded by tokens × candidate patterns. Language packs live in
//! a separate crate (`koine-languages` ships English, Japanese, Turkish).

pub mod command;
pub mod detect;
pub mod error;
pub mod keyword;
pub mod matcher;
pub mod parse;
pub mod pattern;
pub mod profile;
pub mod registry;
pub mod role;
pub mod scan;
pub mod token;
pub mod tokenizer;

pub use command::CanonicalCommand;
pub use error::ParseError;
pub use keyword::{KeywordKind, KeywordRow, KeywordTable, NormalizedKeyword};
pub use matcher::{MatchAttempt, MatchFailure};
pub use parse::{parse, tokenize};
pub use pattern::{ExtractionRule, LanguagePattern, PatternError, PatternSet, TemplateToken};
pub use profile::{Direction, LanguageProfile, MarkingStrategy, WordOrder};
pub use registry::{Registry, SharedRegistry};
pub use role::{Role, RoleMarker};
pub use token::{LanguageToken, Span, TokenKind, TokenStream};
pub use tokenizer::Tokenizer;
