//! Language detection for tooling — never consulted by `parse`.
//!
//! Scanners and bundlers that walk templates want to know which language a
//! snippet is probably written in, so they can record it as metadata. The
//! heuristic is cheap: tokenize the input under every registered language
//! and score keyword hits, command words counting double. The core engine
//! itself never auto-detects; an unregistered or wrong code at parse time
//! is the caller's problem to surface.

use serde::{Deserialize, Serialize};

use crate::keyword::KeywordKind;
use crate::registry::Registry;
use crate::token::TokenKind;

/// One language's detection score for an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    pub language: String,
    /// Weighted keyword hits normalized by token count; 0 when nothing hit.
    pub score: f64,
    pub keyword_hits: usize,
}

/// Score every registered language against the input, best first. Ties keep
/// registration order.
pub fn detect_languages(registry: &Registry, input: &str) -> Vec<LanguageScore> {
    let mut scores = Vec::new();
    for code in registry.codes() {
        // Both lookups are over codes the registry just yielded.
        let Ok(stream) = registry.tokenize(input, code) else {
            continue;
        };
        let Ok(tokenizer) = registry.tokenizer(code) else {
            continue;
        };

        let mut weighted = 0.0;
        let mut hits = 0;
        for token in &stream {
            if token.kind != TokenKind::Keyword {
                continue;
            }
            hits += 1;
            let weight = match tokenizer.lookup_keyword(&token.surface) {
                Some(hit) if hit.kind == KeywordKind::Command => 2.0,
                _ => 1.0,
            };
            weighted += weight;
        }
        let score = if stream.is_empty() {
            0.0
        } else {
            weighted / stream.len() as f64
        };
        scores.push(LanguageScore {
            language: code.to_string(),
            score,
            keyword_hits: hits,
        });
    }
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scores
}
