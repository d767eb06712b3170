//! The pattern matching engine — candidate selection, sequential template
//! matching, and role extraction.
//!
//! Candidates are tried in descending priority order and the first full
//! match wins, with no backtracking across candidates. Priority ordering is
//! the disambiguation mechanism: a specific event+action combined pattern
//! outranks the bare action pattern that would also match a prefix of the
//! same input, so specific multi-role patterns are authored with higher
//! numbers.
//!
//! Within one candidate, matching walks the template and the token stream
//! in lock-step:
//!
//! - a literal must equal the current token's value (normalized form when
//!   present, else surface), case-folded, against the primary value or any
//!   alternative;
//! - a role slot consumes exactly one token, unless a fixed literal follows
//!   (directly, or as the leading literal of the next optional group) — then
//!   consumption is a bounded greedy scan up to that literal's first
//!   occurrence. A `greedy` slot with no bound takes the rest of the stream;
//! - an optional group either matches in full or is skipped in full; a
//!   failed group never leaves partial consumption behind.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::command::CanonicalCommand;
use crate::pattern::{ExtractionRule, LanguagePattern, PatternSet, TemplateToken};
use crate::role::Role;
use crate::token::TokenStream;

/// One failed candidate: which pattern, and how far it got before the first
/// mismatch (a stream position). The diagnostic a human debugging a new
/// language module reads first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAttempt {
    pub pattern: String,
    pub failed_at: usize,
}

/// No pattern matched: the language, the command filter (if any), and every
/// candidate attempted, in the order they were tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFailure {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_filter: Option<String>,
    pub attempts: Vec<MatchAttempt>,
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no pattern matched for language '{}'",
            self.language
        )?;
        if let Some(command) = &self.command_filter {
            write!(f, " (command '{command}')")?;
        }
        write!(f, "; tried {} candidate(s)", self.attempts.len())?;
        for attempt in &self.attempts {
            write!(f, "\n  {} failed at token {}", attempt.pattern, attempt.failed_at)?;
        }
        Ok(())
    }
}

/// Match a token stream against a pattern set, optionally scoped to one
/// command. Returns the first full match in priority order, or the
/// attempted-candidate diagnostic.
pub fn match_stream(
    stream: &TokenStream,
    patterns: &PatternSet,
    command: Option<&str>,
) -> Result<CanonicalCommand, MatchFailure> {
    let mut attempts = Vec::new();
    for pattern in patterns.candidates(command) {
        trace!(pattern = %pattern.id, priority = pattern.priority, "attempting candidate");
        match try_pattern(pattern, stream) {
            Ok(matched) => {
                let command = extract(pattern, stream, &matched);
                debug!(pattern = %pattern.id, command = %command.command, "matched");
                return Ok(command);
            }
            Err(failed_at) => {
                attempts.push(MatchAttempt {
                    pattern: pattern.id.clone(),
                    failed_at,
                });
            }
        }
    }
    Err(MatchFailure {
        language: stream.language().to_string(),
        command_filter: command.map(str::to_string),
        attempts,
    })
}

/// Spans recorded during a successful template walk.
struct Matched<'a> {
    /// Stream range captured by each role slot, in template order.
    captures: Vec<(Role, Range<usize>)>,
    /// Stream index of each matched literal, by primary value.
    literal_hits: Vec<(&'a str, usize)>,
}

struct Walk<'a> {
    stream: &'a TokenStream,
    pos: usize,
    captures: Vec<(Role, Range<usize>)>,
    literal_hits: Vec<(&'a str, usize)>,
}

fn try_pattern<'a>(
    pattern: &'a LanguagePattern,
    stream: &'a TokenStream,
) -> Result<Matched<'a>, usize> {
    let mut walk = Walk {
        stream,
        pos: 0,
        captures: Vec::new(),
        literal_hits: Vec::new(),
    };
    walk_sequence(&mut walk, &pattern.template)?;
    if walk.pos < stream.len() && !pattern.allow_trailing {
        return Err(walk.pos);
    }
    Ok(Matched {
        captures: walk.captures,
        literal_hits: walk.literal_hits,
    })
}

fn walk_sequence<'a>(walk: &mut Walk<'a>, tokens: &'a [TemplateToken]) -> Result<(), usize> {
    for (i, token) in tokens.iter().enumerate() {
        match token {
            TemplateToken::Literal { value, .. } => {
                let input = walk.stream.get(walk.pos).ok_or(walk.pos)?;
                if !token.literal_matches(input.value()) {
                    return Err(walk.pos);
                }
                walk.literal_hits.push((value.as_str(), walk.pos));
                walk.pos += 1;
            }
            TemplateToken::Role { role, greedy } => {
                if walk.pos >= walk.stream.len() {
                    return Err(walk.pos);
                }
                let end = match bounding_literal(&tokens[i + 1..]) {
                    Some((literal, required)) => {
                        match first_occurrence(walk, literal, walk.pos + 1) {
                            Some(at) => at,
                            None if required => return Err(walk.pos),
                            // The bounding group is absent; a greedy slot
                            // takes the rest, a plain slot one token.
                            None if *greedy => walk.stream.len(),
                            None => walk.pos + 1,
                        }
                    }
                    None if *greedy => walk.stream.len(),
                    None => walk.pos + 1,
                };
                walk.captures.push((*role, walk.pos..end));
                walk.pos = end;
            }
            TemplateToken::Group { tokens: inner } => {
                let saved_pos = walk.pos;
                let saved_captures = walk.captures.len();
                let saved_hits = walk.literal_hits.len();
                if walk_sequence(walk, inner).is_err() {
                    walk.pos = saved_pos;
                    walk.captures.truncate(saved_captures);
                    walk.literal_hits.truncate(saved_hits);
                }
            }
        }
    }
    Ok(())
}

/// The literal that bounds a role slot's consumption, if one follows: the
/// next template token when it is a literal (required), or the leading
/// literal of the next optional group (not required — the group may be
/// absent, in which case the slot falls back to a single token).
fn bounding_literal(rest: &[TemplateToken]) -> Option<(&TemplateToken, bool)> {
    match rest.first() {
        Some(literal @ TemplateToken::Literal { .. }) => Some((literal, true)),
        Some(TemplateToken::Group { tokens }) => match tokens.first() {
            Some(literal @ TemplateToken::Literal { .. }) => Some((literal, false)),
            _ => None,
        },
        _ => None,
    }
}

fn first_occurrence(walk: &Walk<'_>, literal: &TemplateToken, from: usize) -> Option<usize> {
    (from..walk.stream.len()).find(|&i| literal.literal_matches(walk.stream[i].value()))
}

/// Build the canonical command from a successful walk.
///
/// Every captured role contributes its span joined by single spaces (each
/// token's normalized form when present, else surface). Explicit rules then
/// refine or add: a position rule narrows a capture to one token, a marker
/// rule captures what follows a matched literal, and a default rule inserts
/// the fixed value an implying literal stands for.
fn extract(
    pattern: &LanguagePattern,
    stream: &TokenStream,
    matched: &Matched<'_>,
) -> CanonicalCommand {
    let mut roles: BTreeMap<Role, String> = BTreeMap::new();

    for (role, range) in &matched.captures {
        roles.insert(*role, join_span(stream, range.clone()));
    }

    for (role, rule) in &pattern.extraction {
        match rule {
            ExtractionRule::Position { position } => {
                let range = matched
                    .captures
                    .iter()
                    .find(|(r, _)| r == role)
                    .map(|(_, range)| range.clone());
                if let Some(range) = range {
                    let at = range.start + position;
                    if at < range.end {
                        roles.insert(*role, stream[at].value().to_string());
                    } else {
                        debug!(
                            pattern = %pattern.id,
                            role = %role,
                            position,
                            "position rule outside the captured span; keeping the joined span"
                        );
                    }
                }
            }
            ExtractionRule::Marker { marker } => {
                let hit = matched
                    .literal_hits
                    .iter()
                    .find(|(value, _)| *value == marker)
                    .map(|(_, at)| *at);
                // A marker inside a skipped optional group never matched;
                // the role stays absent.
                if let Some(at) = hit {
                    let following = matched
                        .captures
                        .iter()
                        .find(|(_, range)| range.start == at + 1)
                        .map(|(_, range)| join_span(stream, range.clone()))
                        .or_else(|| stream.get(at + 1).map(|t| t.value().to_string()));
                    if let Some(value) = following {
                        roles.insert(*role, value);
                    }
                }
            }
            ExtractionRule::Default { default } => {
                roles.insert(*role, default.clone());
            }
        }
    }

    CanonicalCommand {
        command: pattern.command.clone(),
        roles,
        source_pattern: pattern.id.clone(),
    }
}

fn join_span(stream: &TokenStream, range: Range<usize>) -> String {
    range
        .map(|i| stream[i].value())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{LanguageToken, Span, TokenKind};
    use pretty_assertions::assert_eq;

    fn stream(words: &[(&str, TokenKind)]) -> TokenStream {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for (surface, kind) in words {
            let len = surface.chars().count();
            tokens.push(LanguageToken::new(
                *surface,
                *kind,
                Span::new(offset, offset + len),
            ));
            offset += len + 1;
        }
        TokenStream::new("en", tokens)
    }

    fn toggle_on() -> LanguagePattern {
        LanguagePattern::new(
            "en-toggle-on",
            "en",
            "toggle",
            10,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::role(Role::Patient),
                TemplateToken::literal_with("on", &["onto"]),
                TemplateToken::role(Role::Destination),
            ],
        )
    }

    fn bare_toggle() -> LanguagePattern {
        LanguagePattern::new(
            "en-toggle",
            "en",
            "toggle",
            0,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::greedy_role(Role::Patient),
            ],
        )
    }

    fn set(patterns: Vec<LanguagePattern>) -> PatternSet {
        PatternSet::new(patterns).unwrap()
    }

    #[test]
    fn matches_specific_pattern() {
        let input = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
            ("on", TokenKind::Keyword),
            ("#button", TokenKind::Selector),
        ]);
        let result = match_stream(&input, &set(vec![bare_toggle(), toggle_on()]), None).unwrap();
        assert_eq!(result.command, "toggle");
        assert_eq!(result.source_pattern, "en-toggle-on");
        assert_eq!(result.role(Role::Patient), Some(".active"));
        assert_eq!(result.role(Role::Destination), Some("#button"));
    }

    #[test]
    fn higher_priority_wins_when_both_match() {
        // "toggle .active on #button" also matches the greedy bare pattern;
        // the specific one outranks it.
        let input = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
            ("on", TokenKind::Keyword),
            ("#button", TokenKind::Selector),
        ]);
        let by_priority =
            match_stream(&input, &set(vec![bare_toggle(), toggle_on()]), None).unwrap();
        assert_eq!(by_priority.source_pattern, "en-toggle-on");

        // Registration order must not matter.
        let reversed =
            match_stream(&input, &set(vec![toggle_on(), bare_toggle()]), None).unwrap();
        assert_eq!(reversed.source_pattern, "en-toggle-on");
    }

    #[test]
    fn bounded_greedy_slot_spans_to_next_literal() {
        let pattern = LanguagePattern::new(
            "en-put-into",
            "en",
            "put",
            0,
            vec![
                TemplateToken::literal("put"),
                TemplateToken::role(Role::Patient),
                TemplateToken::literal("into"),
                TemplateToken::role(Role::Destination),
            ],
        );
        let input = stream(&[
            ("put", TokenKind::Keyword),
            ("hello", TokenKind::Identifier),
            ("there", TokenKind::Identifier),
            ("into", TokenKind::Keyword),
            ("#log", TokenKind::Selector),
        ]);
        let result = match_stream(&input, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.role(Role::Patient), Some("hello there"));
        assert_eq!(result.role(Role::Destination), Some("#log"));
    }

    #[test]
    fn optional_group_matches_present_and_absent() {
        let pattern = LanguagePattern::new(
            "en-toggle-then",
            "en",
            "toggle",
            0,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::role(Role::Patient),
                TemplateToken::group(vec![
                    TemplateToken::literal("then"),
                    TemplateToken::greedy_role(Role::Continues),
                ]),
            ],
        );
        let patterns = set(vec![pattern]);

        let without = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
        ]);
        let bare = match_stream(&without, &patterns, None).unwrap();
        assert_eq!(bare.role(Role::Patient), Some(".active"));
        assert_eq!(bare.role(Role::Continues), None);

        let with = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
            ("then", TokenKind::Keyword),
            ("hide", TokenKind::Keyword),
            ("#menu", TokenKind::Selector),
        ]);
        let continued = match_stream(&with, &patterns, None).unwrap();
        assert_eq!(continued.role(Role::Patient), Some(".active"));
        assert_eq!(continued.role(Role::Continues), Some("hide #menu"));

        // The only difference is the group's own role.
        let mut bare_roles = bare.roles.clone();
        bare_roles.insert(Role::Continues, "hide #menu".to_string());
        assert_eq!(bare_roles, continued.roles);
    }

    #[test]
    fn slot_bounded_by_optional_group_literal() {
        // The group's leading literal bounds the slot when present, and the
        // slot falls back to one token when the group is absent.
        let pattern = LanguagePattern::new(
            "en-show-in",
            "en",
            "show",
            0,
            vec![
                TemplateToken::literal("show"),
                TemplateToken::role(Role::Patient),
                TemplateToken::group(vec![
                    TemplateToken::literal("in"),
                    TemplateToken::role(Role::Position),
                ]),
            ],
        );
        let patterns = set(vec![pattern]);

        let with = stream(&[
            ("show", TokenKind::Keyword),
            ("the", TokenKind::Identifier),
            ("menu", TokenKind::Identifier),
            ("in", TokenKind::Keyword),
            ("#sidebar", TokenKind::Selector),
        ]);
        let result = match_stream(&with, &patterns, None).unwrap();
        assert_eq!(result.role(Role::Patient), Some("the menu"));
        assert_eq!(result.role(Role::Position), Some("#sidebar"));

        let without = stream(&[("show", TokenKind::Keyword), ("#menu", TokenKind::Selector)]);
        let result = match_stream(&without, &patterns, None).unwrap();
        assert_eq!(result.role(Role::Patient), Some("#menu"));
        assert_eq!(result.role(Role::Position), None);
    }

    #[test]
    fn trailing_tokens_fail_unless_tolerated() {
        let input = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
            ("now", TokenKind::Identifier),
        ]);
        let strict = LanguagePattern::new(
            "en-toggle-strict",
            "en",
            "toggle",
            0,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::role(Role::Patient),
            ],
        );
        let failure = match_stream(&input, &set(vec![strict.clone()]), None).unwrap_err();
        assert_eq!(failure.attempts.len(), 1);
        assert_eq!(failure.attempts[0].failed_at, 2);

        let tolerant = LanguagePattern::new(
            "en-toggle-loose",
            "en",
            "toggle",
            0,
            vec![
                TemplateToken::literal("toggle"),
                TemplateToken::role(Role::Patient),
            ],
        )
        .tolerate_trailing();
        let result = match_stream(&input, &set(vec![tolerant]), None).unwrap();
        assert_eq!(result.role(Role::Patient), Some(".active"));
    }

    #[test]
    fn extraction_rules_refine_and_default() {
        let pattern = LanguagePattern::new(
            "en-remove-from",
            "en",
            "remove",
            0,
            vec![
                TemplateToken::literal("remove"),
                TemplateToken::role(Role::Patient),
                TemplateToken::literal("from"),
                TemplateToken::role(Role::Source),
            ],
        )
        .extract(
            Role::Source,
            ExtractionRule::Marker {
                marker: "from".into(),
            },
        )
        .extract(
            Role::Event,
            ExtractionRule::Default {
                default: "click".into(),
            },
        );
        let input = stream(&[
            ("remove", TokenKind::Keyword),
            (".item", TokenKind::Selector),
            ("from", TokenKind::Keyword),
            ("#list", TokenKind::Selector),
        ]);
        let result = match_stream(&input, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.role(Role::Source), Some("#list"));
        assert_eq!(result.role(Role::Event), Some("click"));
    }

    #[test]
    fn position_rule_narrows_a_span() {
        let pattern = LanguagePattern::new(
            "en-log",
            "en",
            "log",
            0,
            vec![
                TemplateToken::literal("log"),
                TemplateToken::greedy_role(Role::Patient),
            ],
        )
        .extract(Role::Patient, ExtractionRule::Position { position: 1 });
        let input = stream(&[
            ("log", TokenKind::Keyword),
            ("the", TokenKind::Identifier),
            ("answer", TokenKind::Identifier),
        ]);
        let result = match_stream(&input, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.role(Role::Patient), Some("answer"));
    }

    #[test]
    fn position_rule_outside_span_keeps_the_joined_span() {
        let pattern = LanguagePattern::new(
            "en-log",
            "en",
            "log",
            0,
            vec![
                TemplateToken::literal("log"),
                TemplateToken::greedy_role(Role::Patient),
            ],
        )
        .extract(Role::Patient, ExtractionRule::Position { position: 5 });
        let input = stream(&[
            ("log", TokenKind::Keyword),
            ("the", TokenKind::Identifier),
            ("answer", TokenKind::Identifier),
        ]);
        let result = match_stream(&input, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.role(Role::Patient), Some("the answer"));
    }

    #[test]
    fn marker_in_skipped_group_leaves_role_absent() {
        let pattern = LanguagePattern::new(
            "en-add-to",
            "en",
            "add",
            0,
            vec![
                TemplateToken::literal("add"),
                TemplateToken::role(Role::Patient),
                TemplateToken::group(vec![
                    TemplateToken::literal("to"),
                    TemplateToken::role(Role::Destination),
                ]),
            ],
        )
        .extract(
            Role::Destination,
            ExtractionRule::Marker {
                marker: "to".into(),
            },
        );
        let input = stream(&[("add", TokenKind::Keyword), (".hot", TokenKind::Selector)]);
        let result = match_stream(&input, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.role(Role::Destination), None);
    }

    #[test]
    fn command_filter_limits_candidates() {
        let input = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
        ]);
        let patterns = set(vec![bare_toggle()]);
        assert!(match_stream(&input, &patterns, Some("toggle")).is_ok());

        let failure = match_stream(&input, &patterns, Some("hide")).unwrap_err();
        assert_eq!(failure.command_filter.as_deref(), Some("hide"));
        assert!(failure.attempts.is_empty());
    }

    #[test]
    fn diagnostic_reports_failure_positions_in_order() {
        let input = stream(&[
            ("toggle", TokenKind::Keyword),
            (".active", TokenKind::Selector),
        ]);
        let failure =
            match_stream(&input, &set(vec![toggle_on()]), None).unwrap_err();
        assert_eq!(failure.language, "en");
        assert_eq!(failure.attempts.len(), 1);
        assert_eq!(failure.attempts[0].pattern, "en-toggle-on");
        // The patient slot wants a bounding "on" that never arrives.
        assert_eq!(failure.attempts[0].failed_at, 1);
    }

    #[test]
    fn normalized_values_drive_literal_matching() {
        // A keyword token whose surface differs from its canonical value
        // still matches a canonical literal through `normalized`.
        let tokens = TokenStream::new(
            "tr",
            vec![
                LanguageToken::new(".active", TokenKind::Selector, Span::new(0, 7)),
                LanguageToken::new("değiştir", TokenKind::Keyword, Span::new(8, 16))
                    .with_normalized("toggle"),
            ],
        );
        let pattern = LanguagePattern::new(
            "tr-toggle",
            "tr",
            "toggle",
            0,
            vec![
                TemplateToken::role(Role::Patient),
                TemplateToken::literal("toggle"),
            ],
        );
        let result = match_stream(&tokens, &set(vec![pattern]), None).unwrap();
        assert_eq!(result.command, "toggle");
        assert_eq!(result.role(Role::Patient), Some(".active"));
    }
}
