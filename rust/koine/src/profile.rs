//! Per-language metadata — static facts about how a language is written.
//!
//! A profile is built once, registered alongside the language's tokenizer
//! and patterns, and never mutated afterwards. The matching engine itself
//! never branches on any of these fields; they exist for language-pack
//! authors and tooling (the tokenizer encapsulates everything
//! script-specific).

use serde::{Deserialize, Serialize};

use crate::role::RoleMarker;

/// Script direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

/// Dominant constituent order of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WordOrder {
    Svo,
    Sov,
    Vso,
}

/// How the language signals a role's grammatical function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkingStrategy {
    /// Detached word before the argument ("on #button").
    Preposition,
    /// Detached word after the argument.
    Postposition,
    /// Detached grammatical particle (を, に).
    Particle,
    /// Suffix attached to the argument token itself (".activei").
    CaseSuffix,
}

/// Static per-language metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// ISO 639-1 code ("en", "ja", "tr").
    pub code: String,
    /// English name of the language.
    pub name: String,
    /// The language's own name for itself.
    pub native_name: String,
    pub direction: Direction,
    pub word_order: WordOrder,
    pub marking: MarkingStrategy,
    /// Whether inter-word whitespace is a reliable token separator.
    pub uses_spaces: bool,
    /// The marker surfaces that signal roles in this language.
    pub role_markers: Vec<RoleMarker>,
}

impl LanguageProfile {
    /// The role a marker surface signals, if any.
    pub fn role_for_marker(&self, surface: &str) -> Option<crate::role::Role> {
        self.role_markers
            .iter()
            .find(|m| m.surface == surface)
            .map(|m| m.role)
    }
}
