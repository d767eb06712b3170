//! Keyword lookup — O(1) classification of native surface forms.
//!
//! Each tokenizer owns a [`KeywordTable`]: a hash map from case-folded
//! native spellings (including every declared alternative) to the canonical
//! command or role name. The table is built once at tokenizer construction
//! and never mutated afterwards, so lookups are pure functions of their
//! input. A linear scan over the same rows is the naive baseline this
//! replaces; both must classify identically (see the equivalence test).

use std::collections::HashMap;

/// What a keyword means to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    /// A command word ("toggle", 切り替え, "değiştir").
    Command,
    /// A role marker word ("on", "from", の particle when spelled out).
    Marker,
    /// An event noun ("click", クリック, "tıklama").
    Event,
    /// A noise word patterns may tolerate but never require ("the", "bir").
    Noise,
}

/// The canonical value a native spelling folds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKeyword {
    /// The language-independent name ("toggle", "on", "click").
    pub canonical: String,
    pub kind: KeywordKind,
}

/// One row of a language's keyword declaration: a canonical name plus the
/// native spellings (primary and alternatives) that fold to it.
#[derive(Debug, Clone)]
pub struct KeywordRow {
    pub canonical: String,
    pub kind: KeywordKind,
    pub spellings: Vec<String>,
}

impl KeywordRow {
    pub fn new(
        canonical: impl Into<String>,
        kind: KeywordKind,
        spellings: &[&str],
    ) -> Self {
        KeywordRow {
            canonical: canonical.into(),
            kind,
            spellings: spellings.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Case-folded hash lookup over a language's keyword rows.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    map: HashMap<String, NormalizedKeyword>,
    rows: Vec<KeywordRow>,
}

/// Unicode-aware case fold. Scripts without case (kana, kanji) pass through
/// unchanged, so the same code path serves every language.
pub fn fold(surface: &str) -> String {
    surface.to_lowercase()
}

impl KeywordTable {
    /// Build the lookup map from declaration rows. Later rows win on
    /// spelling collisions, mirroring how a linear scan over the reversed
    /// row list would behave; language packs are expected not to collide.
    pub fn new(rows: Vec<KeywordRow>) -> Self {
        let mut map = HashMap::new();
        for row in &rows {
            for spelling in &row.spellings {
                map.insert(
                    fold(spelling),
                    NormalizedKeyword {
                        canonical: row.canonical.clone(),
                        kind: row.kind,
                    },
                );
            }
        }
        KeywordTable { map, rows }
    }

    /// O(1) amortized classification of a surface form.
    pub fn lookup(&self, surface: &str) -> Option<&NormalizedKeyword> {
        self.map.get(&fold(surface))
    }

    /// The naive baseline: walk every row and spelling. Kept for the
    /// equivalence property test; not used on the parse path.
    pub fn lookup_linear(&self, surface: &str) -> Option<NormalizedKeyword> {
        let folded = fold(surface);
        let mut found = None;
        for row in &self.rows {
            for spelling in &row.spellings {
                if fold(spelling) == folded {
                    found = Some(NormalizedKeyword {
                        canonical: row.canonical.clone(),
                        kind: row.kind,
                    });
                }
            }
        }
        found
    }

    /// The declaration rows the table was built from.
    pub fn rows(&self) -> &[KeywordRow] {
        &self.rows
    }

    /// Every registered spelling, folded. Used by no-space tokenizers for
    /// longest-match segmentation.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|row| row.spellings.iter().map(|s| s.as_str()))
    }

    /// Length in chars of the longest registered spelling.
    pub fn longest_spelling(&self) -> usize {
        self.spellings()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeywordTable {
        KeywordTable::new(vec![
            KeywordRow::new("toggle", KeywordKind::Command, &["toggle", "switch", "flip"]),
            KeywordRow::new("on", KeywordKind::Marker, &["on", "onto"]),
            KeywordRow::new("the", KeywordKind::Noise, &["the"]),
        ])
    }

    #[test]
    fn lookup_folds_case() {
        let table = table();
        let hit = table.lookup("Toggle").unwrap();
        assert_eq!(hit.canonical, "toggle");
        assert_eq!(hit.kind, KeywordKind::Command);
        assert_eq!(table.lookup("FLIP").unwrap().canonical, "toggle");
    }

    #[test]
    fn lookup_misses_off_table() {
        assert!(table().lookup("xyzzy").is_none());
    }

    #[test]
    fn hash_and_linear_agree_over_full_table() {
        let table = table();
        for spelling in table.spellings().map(str::to_string).collect::<Vec<_>>() {
            let hashed = table.lookup(&spelling).cloned();
            let linear = table.lookup_linear(&spelling);
            assert_eq!(hashed, linear, "disagreement on {spelling:?}");
        }
        assert_eq!(table.lookup("absent"), None);
        assert_eq!(table.lookup_linear("absent"), None);
    }

    #[test]
    fn longest_spelling_counts_chars() {
        let table = KeywordTable::new(vec![KeywordRow::new(
            "toggle",
            KeywordKind::Command,
            &["切り替え", "切り替える"],
        )]);
        assert_eq!(table.longest_spelling(), 5);
    }
}
