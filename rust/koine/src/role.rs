//! Semantic roles — the language-independent argument slots of a command.
//!
//! Roles abstract away language-specific syntax (prepositions, particles,
//! case suffixes, word order) into universal categories. A Turkish locative
//! suffix, a Japanese particle, and an English preposition that all signal
//! "where the event happens" map to the same role, so a single pattern
//! vocabulary covers every marking strategy.
//!
//! The mapping from a language's marker words to roles lives in that
//! language's [`LanguageProfile`](crate::profile::LanguageProfile) as
//! [`RoleMarker`] rows — localization changes data, never matcher logic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic role of an extracted command argument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The thing acted upon — the direct object.
    /// In "toggle .active on #button", `.active` is the patient.
    Patient,
    /// The origin of a transfer or motion ("from X").
    Source,
    /// The target of a transfer or placement ("on X", "into X").
    Destination,
    /// A time span ("wait 2s").
    Duration,
    /// The DOM event a command is bound to ("on click …").
    Event,
    /// The canonical action name, when a pattern implies it rather than
    /// extracting it (grammar-generated combined forms).
    Action,
    /// An end state or purpose distinct from a physical destination.
    Goal,
    /// A follow-on command introduced by a continuation word ("then …").
    Continues,
    /// A positional qualifier ("at the top", "before X").
    Position,
}

impl Role {
    /// Every role, in declaration order. Handy for exhaustive table tests.
    pub const ALL: [Role; 9] = [
        Role::Patient,
        Role::Source,
        Role::Destination,
        Role::Duration,
        Role::Event,
        Role::Action,
        Role::Goal,
        Role::Continues,
        Role::Position,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Source => "source",
            Role::Destination => "destination",
            Role::Duration => "duration",
            Role::Event => "event",
            Role::Action => "action",
            Role::Goal => "goal",
            Role::Continues => "continues",
            Role::Position => "position",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A mapping from a marker surface form to the role it signals, scoped to
/// one language by living in that language's profile.
///
/// Depending on the profile's marking strategy the surface is a preposition
/// word ("from"), a postposition, a detached particle (を), or an attached
/// case suffix ("de").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMarker {
    pub surface: String,
    pub role: Role,
}

impl RoleMarker {
    pub fn new(surface: impl Into<String>, role: Role) -> Self {
        RoleMarker {
            surface: surface.into(),
            role,
        }
    }
}
