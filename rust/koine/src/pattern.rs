//! Pattern representation — declarative templates plus extraction rules.
//!
//! A [`LanguagePattern`] is pure data: an ordered list of template tokens
//! (literal with alternative spellings, semantic-role slot, optional group)
//! and a map of extraction rules describing how each role's value is
//! recovered from a match. Patterns are authored per (language, command)
//! pair and disambiguated by priority: higher priority is tried first, so
//! specific multi-role patterns are given higher numbers than the general
//! forms they overlap.
//!
//! The serde shape of these types is a stable interchange format — external
//! generator scripts that scaffold new language packs emit exactly this
//! JSON, so field names and defaults here must not drift (see
//! [`PatternSet::from_json`]).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::role::Role;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One element of a pattern's template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateToken {
    /// A fixed word the input must contain, by primary value or any
    /// declared alternative. Compared against the input token's normalized
    /// form when present, else its surface, case-insensitively.
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternatives: Vec<String>,
    },
    /// A slot capturing input tokens as the role's value span.
    Role {
        role: Role,
        /// A greedy slot in final position takes the rest of the stream.
        #[serde(default, skip_serializing_if = "is_false")]
        greedy: bool,
    },
    /// An optional sub-sequence: either matches in full or is skipped in
    /// full. Groups do not nest.
    Group { tokens: Vec<TemplateToken> },
}

impl TemplateToken {
    pub fn literal(value: impl Into<String>) -> Self {
        TemplateToken::Literal {
            value: value.into(),
            alternatives: Vec::new(),
        }
    }

    pub fn literal_with(value: impl Into<String>, alternatives: &[&str]) -> Self {
        TemplateToken::Literal {
            value: value.into(),
            alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn role(role: Role) -> Self {
        TemplateToken::Role {
            role,
            greedy: false,
        }
    }

    pub fn greedy_role(role: Role) -> Self {
        TemplateToken::Role { role, greedy: true }
    }

    pub fn group(tokens: Vec<TemplateToken>) -> Self {
        TemplateToken::Group { tokens }
    }

    /// Whether an input value matches this literal (primary or alternative),
    /// case-folded. Only meaningful for `Literal`.
    pub fn literal_matches(&self, value: &str) -> bool {
        match self {
            TemplateToken::Literal {
                value: primary,
                alternatives,
            } => {
                let folded = crate::keyword::fold(value);
                crate::keyword::fold(primary) == folded
                    || alternatives
                        .iter()
                        .any(|alt| crate::keyword::fold(alt) == folded)
            }
            _ => false,
        }
    }
}

/// How a role's value is recovered from a successful match.
///
/// Serialized as `{"position": N}`, `{"marker": "from"}`, or
/// `{"default": "click"}` — the field name is the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionRule {
    /// The single token at `position` within the role's captured span. An
    /// index past the span's end leaves the full joined span in place.
    Position { position: usize },
    /// The span following the template literal whose primary value equals
    /// `marker` (e.g. "from X" → X).
    Marker { marker: String },
    /// A fixed value for a role the template implies rather than captures
    /// (a "click" literal implies event=click without re-extraction).
    Default { default: String },
}

/// A declarative template mapping a token sequence to a canonical command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePattern {
    pub id: String,
    pub language: String,
    pub command: String,
    pub priority: i32,
    pub template: Vec<TemplateToken>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extraction: BTreeMap<Role, ExtractionRule>,
    /// Tolerate input tokens after the template; off by default — a match
    /// must cover the whole semantically relevant span.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_trailing: bool,
}

impl LanguagePattern {
    pub fn new(
        id: impl Into<String>,
        language: impl Into<String>,
        command: impl Into<String>,
        priority: i32,
        template: Vec<TemplateToken>,
    ) -> Self {
        LanguagePattern {
            id: id.into(),
            language: language.into(),
            command: command.into(),
            priority,
            template,
            extraction: BTreeMap::new(),
            allow_trailing: false,
        }
    }

    pub fn extract(mut self, role: Role, rule: ExtractionRule) -> Self {
        self.extraction.insert(role, rule);
        self
    }

    pub fn tolerate_trailing(mut self) -> Self {
        self.allow_trailing = true;
        self
    }

    /// Roles captured by a slot anywhere in the template, groups included.
    pub fn captured_roles(&self) -> BTreeSet<Role> {
        let mut roles = BTreeSet::new();
        for token in &self.template {
            match token {
                TemplateToken::Role { role, .. } => {
                    roles.insert(*role);
                }
                TemplateToken::Group { tokens } => {
                    for inner in tokens {
                        if let TemplateToken::Role { role, .. } = inner {
                            roles.insert(*role);
                        }
                    }
                }
                TemplateToken::Literal { .. } => {}
            }
        }
        roles
    }

    /// Primary values of every literal, groups included.
    pub fn literal_primaries(&self) -> BTreeSet<&str> {
        let mut values = BTreeSet::new();
        for token in &self.template {
            match token {
                TemplateToken::Literal { value, .. } => {
                    values.insert(value.as_str());
                }
                TemplateToken::Group { tokens } => {
                    for inner in tokens {
                        if let TemplateToken::Literal { value, .. } = inner {
                            values.insert(value.as_str());
                        }
                    }
                }
                TemplateToken::Role { .. } => {}
            }
        }
        values
    }

    /// The fewest input tokens this template can match: one per literal and
    /// one per role slot, optional groups contributing nothing.
    pub fn min_tokens(&self) -> usize {
        self.template
            .iter()
            .filter(|t| !matches!(t, TemplateToken::Group { .. }))
            .count()
    }
}

/// Registration-time template rejection. Parse time never sees a malformed
/// pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern '{pattern}' has an empty template")]
    EmptyTemplate { pattern: String },

    #[error("pattern '{pattern}' contains an empty group")]
    EmptyGroup { pattern: String },

    #[error("pattern '{pattern}' nests a group inside a group")]
    NestedGroup { pattern: String },

    #[error("pattern '{pattern}' contains a literal with an empty value")]
    EmptyLiteral { pattern: String },

    #[error("pattern '{pattern}' extracts role '{role}' by position but no slot captures it")]
    MissingCapture { pattern: String, role: Role },

    #[error("pattern '{pattern}' extracts via marker '{marker}' but no literal has that primary value")]
    UnknownMarker { pattern: String, marker: String },

    #[error(
        "patterns '{first}' and '{second}' for command '{command}' share priority {priority} with the same minimum token count"
    )]
    PriorityCollision {
        command: String,
        priority: i32,
        first: String,
        second: String,
    },

    #[error("malformed pattern payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validated, registration-ordered collection of patterns for one
/// language. Construction is the validation boundary: a `PatternSet` in
/// hand is guaranteed well-formed.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<LanguagePattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<LanguagePattern>) -> Result<Self, PatternError> {
        for pattern in &patterns {
            validate_template(pattern)?;
            validate_extraction(pattern)?;
        }
        validate_priorities(&patterns)?;
        Ok(PatternSet { patterns })
    }

    /// Load a generator payload: a JSON array of patterns in the stable
    /// interchange shape.
    pub fn from_json(payload: &str) -> Result<Self, PatternError> {
        let patterns: Vec<LanguagePattern> = serde_json::from_str(payload)?;
        Self::new(patterns)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguagePattern> {
        self.patterns.iter()
    }

    /// Candidate patterns for a match attempt: optionally filtered to one
    /// command, sorted by descending priority with registration order
    /// breaking ties (stable sort).
    pub fn candidates(&self, command: Option<&str>) -> Vec<&LanguagePattern> {
        let mut candidates: Vec<&LanguagePattern> = self
            .patterns
            .iter()
            .filter(|p| command.is_none_or(|c| p.command == c))
            .collect();
        candidates.sort_by_key(|p| std::cmp::Reverse(p.priority));
        candidates
    }
}

fn validate_template(pattern: &LanguagePattern) -> Result<(), PatternError> {
    if pattern.template.is_empty() {
        return Err(PatternError::EmptyTemplate {
            pattern: pattern.id.clone(),
        });
    }
    for token in &pattern.template {
        validate_token(pattern, token, false)?;
    }
    Ok(())
}

fn validate_token(
    pattern: &LanguagePattern,
    token: &TemplateToken,
    in_group: bool,
) -> Result<(), PatternError> {
    match token {
        TemplateToken::Literal { value, .. } => {
            if value.is_empty() {
                return Err(PatternError::EmptyLiteral {
                    pattern: pattern.id.clone(),
                });
            }
        }
        TemplateToken::Role { .. } => {}
        TemplateToken::Group { tokens } => {
            if in_group {
                return Err(PatternError::NestedGroup {
                    pattern: pattern.id.clone(),
                });
            }
            if tokens.is_empty() {
                return Err(PatternError::EmptyGroup {
                    pattern: pattern.id.clone(),
                });
            }
            for inner in tokens {
                validate_token(pattern, inner, true)?;
            }
        }
    }
    Ok(())
}

fn validate_extraction(pattern: &LanguagePattern) -> Result<(), PatternError> {
    let captured = pattern.captured_roles();
    let primaries = pattern.literal_primaries();
    for (role, rule) in &pattern.extraction {
        match rule {
            ExtractionRule::Position { .. } => {
                if !captured.contains(role) {
                    return Err(PatternError::MissingCapture {
                        pattern: pattern.id.clone(),
                        role: *role,
                    });
                }
            }
            ExtractionRule::Marker { marker } => {
                if !primaries.contains(marker.as_str()) {
                    return Err(PatternError::UnknownMarker {
                        pattern: pattern.id.clone(),
                        marker: marker.clone(),
                    });
                }
            }
            ExtractionRule::Default { .. } => {}
        }
    }
    Ok(())
}

/// Two patterns for the same command with equal priority and the same
/// minimum token count cannot be ordered meaningfully; reject them.
fn validate_priorities(patterns: &[LanguagePattern]) -> Result<(), PatternError> {
    for (i, a) in patterns.iter().enumerate() {
        for b in &patterns[i + 1..] {
            if a.command == b.command
                && a.priority == b.priority
                && a.min_tokens() == b.min_tokens()
            {
                return Err(PatternError::PriorityCollision {
                    command: a.command.clone(),
                    priority: a.priority,
                    first: a.id.clone(),
                    second: b.id.clone(),
                });
            }
        }
    }
    Ok(())
}
