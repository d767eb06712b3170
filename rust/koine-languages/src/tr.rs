//! Turkish language pack.
//!
//! SOV order with agglutinative morphology: roles are signalled by case
//! suffixes attached to the argument token itself (accusative `.activei`,
//! locative `tıklamade`, dative `#anasayfaya`). The tokenizer recognizes
//! those suffixes on the tail of selector and word tokens and carries the
//! stem in `normalized`, so patterns match and extract canonical stems.
//!
//! Two stripping regimes, because the safety arguments differ:
//! - word tokens strip a suffix only when the remaining stem is a known
//!   keyword (the table is the oracle; "tıklamade" → "tıklama" → click);
//! - selector tokens have no oracle, so a suffix is stripped only when its
//!   vowel harmonizes with the stem's last vowel, the stem keeps at least
//!   two characters after the sigil, and the bare dative vowels (a, e) are
//!   never stripped — too many foreign class names end in them.

use koine::keyword::{self, KeywordKind, KeywordRow, KeywordTable, NormalizedKeyword};
use koine::pattern::{ExtractionRule, LanguagePattern, PatternSet, TemplateToken};
use koine::profile::{Direction, LanguageProfile, MarkingStrategy, WordOrder};
use koine::registry::Registry;
use koine::role::{Role, RoleMarker};
use koine::scan::{self, Cursor};
use koine::token::{LanguageToken, Span, TokenKind, TokenStream};
use koine::tokenizer::Tokenizer;

pub const CODE: &str = "tr";

/// Case suffixes with their harmony vowel, longest first so "den" is never
/// read as "en" + noise or "n" + "de".
const CASE_SUFFIXES: [(&str, char); 18] = [
    ("dan", 'a'),
    ("den", 'e'),
    ("tan", 'a'),
    ("ten", 'e'),
    ("yı", 'ı'),
    ("yi", 'i'),
    ("yu", 'u'),
    ("yü", 'ü'),
    ("ya", 'a'),
    ("ye", 'e'),
    ("da", 'a'),
    ("de", 'e'),
    ("ta", 'a'),
    ("te", 'e'),
    ("ı", 'ı'),
    ("i", 'i'),
    ("u", 'u'),
    ("ü", 'ü'),
];

/// Bare dative vowels, only tried against the keyword table.
const KEYWORD_ONLY_SUFFIXES: [&str; 2] = ["a", "e"];

const VOWELS: &str = "aeıioöuü";

fn last_vowel(stem: &str) -> Option<char> {
    stem.chars().rev().find(|c| VOWELS.contains(*c))
}

/// Turkish two-way/four-way vowel harmony: which stem-final vowels admit a
/// suffix with the given vowel.
fn harmonizes(stem_vowel: char, suffix_vowel: char) -> bool {
    match suffix_vowel {
        'ı' => "aı".contains(stem_vowel),
        'i' => "ei".contains(stem_vowel),
        'u' => "ou".contains(stem_vowel),
        'ü' => "öü".contains(stem_vowel),
        'a' => "aıou".contains(stem_vowel),
        'e' => "eiöü".contains(stem_vowel),
        _ => false,
    }
}

pub fn keyword_rows() -> Vec<KeywordRow> {
    use KeywordKind::*;
    vec![
        KeywordRow::new("toggle", Command, &["değiştir"]),
        KeywordRow::new("add", Command, &["ekle"]),
        KeywordRow::new("remove", Command, &["kaldır", "sil"]),
        KeywordRow::new("show", Command, &["göster"]),
        KeywordRow::new("hide", Command, &["gizle"]),
        KeywordRow::new("set", Command, &["ayarla"]),
        KeywordRow::new("put", Command, &["koy"]),
        KeywordRow::new("increment", Command, &["artır"]),
        KeywordRow::new("decrement", Command, &["azalt"]),
        KeywordRow::new("log", Command, &["kaydet"]),
        KeywordRow::new("send", Command, &["gönder"]),
        KeywordRow::new("trigger", Command, &["tetikle"]),
        KeywordRow::new("wait", Command, &["bekle"]),
        KeywordRow::new("fetch", Command, &["getir"]),
        KeywordRow::new("go", Command, &["git"]),
        KeywordRow::new("then", Marker, &["sonra"]),
        KeywordRow::new("click", Event, &["tıklama", "tık"]),
        KeywordRow::new("submit", Event, &["gönderim"]),
        KeywordRow::new("change", Event, &["değişim"]),
        KeywordRow::new("load", Event, &["yükleme"]),
        KeywordRow::new("bir", Noise, &["bir"]),
    ]
}

pub struct TurkishTokenizer {
    keywords: KeywordTable,
}

impl TurkishTokenizer {
    pub fn new() -> Self {
        TurkishTokenizer {
            keywords: KeywordTable::new(keyword_rows()),
        }
    }

    /// Classify a word through [`Self::keyword_for`].
    fn word_token(&self, word: String, span: Span) -> LanguageToken {
        match self.keyword_for(&word) {
            Some(hit) => {
                let canonical = hit.canonical.clone();
                LanguageToken::new(word, TokenKind::Keyword, span).with_normalized(canonical)
            }
            None => LanguageToken::new(word, TokenKind::Identifier, span),
        }
    }

    /// The keyword a word resolves to: the surface itself, or failing that
    /// the stem left by stripping a case suffix, when the table knows it.
    fn keyword_for(&self, word: &str) -> Option<&NormalizedKeyword> {
        if let Some(hit) = self.keywords.lookup(word) {
            return Some(hit);
        }
        let folded = keyword::fold(word);
        let suffixes = CASE_SUFFIXES
            .iter()
            .map(|(s, _)| *s)
            .chain(KEYWORD_ONLY_SUFFIXES);
        for suffix in suffixes {
            if let Some(stem) = folded.strip_suffix(suffix) {
                if stem.chars().count() < 2 {
                    continue;
                }
                if let Some(hit) = self.keywords.lookup(stem) {
                    return Some(hit);
                }
            }
        }
        None
    }

    /// Strip a harmonizing case suffix from a selector surface, keeping at
    /// least sigil + two characters of stem.
    fn strip_selector_suffix(&self, surface: &str) -> Option<String> {
        let folded = keyword::fold(surface);
        for (suffix, vowel) in CASE_SUFFIXES {
            let Some(stem) = folded.strip_suffix(suffix) else {
                continue;
            };
            if stem.chars().count() < 3 {
                continue;
            }
            let Some(stem_vowel) = last_vowel(stem) else {
                continue;
            };
            if harmonizes(stem_vowel, vowel) {
                return Some(stem.to_string());
            }
        }
        None
    }
}

impl Default for TurkishTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_selector_char(ch: char) -> bool {
    scan::is_ascii_selector_char(ch) || "çğıöşüÇĞİÖŞÜ".contains(ch)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '\''
}

impl Tokenizer for TurkishTokenizer {
    fn language(&self) -> &str {
        CODE
    }

    fn tokenize(&self, input: &str) -> TokenStream {
        let mut cursor = Cursor::new(input);
        let mut tokens = Vec::new();
        while !cursor.is_at_end() {
            cursor.skip_whitespace();
            if cursor.is_at_end() {
                break;
            }
            if let Some(token) = scan::scan_selector(&mut cursor, is_selector_char) {
                let token = match self.strip_selector_suffix(&token.surface) {
                    Some(stem) => token.with_normalized(stem),
                    None => token,
                };
                tokens.push(token);
            } else if let Some(token) = scan::scan_string(&mut cursor) {
                tokens.push(token);
            } else if let Some(token) = scan::scan_number(&mut cursor) {
                tokens.push(token);
            } else if let Some(token) = scan::scan_url(&mut cursor) {
                tokens.push(token);
            } else if let Some(token) = scan::scan_sigil(&mut cursor) {
                tokens.push(token);
            } else if cursor.peek().is_some_and(scan::is_operator_char) {
                let start = cursor.pos();
                let ch = cursor.advance().unwrap_or_default();
                tokens.push(LanguageToken::new(
                    ch.to_string(),
                    TokenKind::Operator,
                    Span::new(start, start + 1),
                ));
            } else if let Some((word, span)) = cursor.take_while(is_word_char) {
                tokens.push(self.word_token(word, span));
            } else {
                cursor.advance();
            }
        }
        TokenStream::new(CODE, tokens)
    }

    /// Suffix-aware, so a standalone lookup classifies exactly the way
    /// `tokenize` classifies the same word.
    fn lookup_keyword(&self, surface: &str) -> Option<&NormalizedKeyword> {
        self.keyword_for(surface)
    }
}

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        code: CODE.into(),
        name: "Turkish".into(),
        native_name: "Türkçe".into(),
        direction: Direction::Ltr,
        word_order: WordOrder::Sov,
        marking: MarkingStrategy::CaseSuffix,
        uses_spaces: true,
        role_markers: vec![
            RoleMarker::new("i", Role::Patient),
            RoleMarker::new("ı", Role::Patient),
            RoleMarker::new("u", Role::Patient),
            RoleMarker::new("ü", Role::Patient),
            RoleMarker::new("e", Role::Destination),
            RoleMarker::new("a", Role::Destination),
            RoleMarker::new("de", Role::Position),
            RoleMarker::new("da", Role::Position),
            RoleMarker::new("den", Role::Source),
            RoleMarker::new("dan", Role::Source),
        ],
    }
}

/// Turkish pattern set. The `grammar-tr-*` family mirrors the output of the
/// external grammar generator: arguments precede the verb with their case
/// suffixes attached, and implied roles come back through default rules.
pub fn patterns() -> PatternSet {
    use TemplateToken as T;

    let patterns = vec![
        // ".activei tıklamade değiştir" — click-bound toggle.
        LanguagePattern::new(
            "grammar-tr-click-toggle",
            CODE,
            "toggle",
            30,
            vec![
                T::role(Role::Patient),
                T::literal("click"),
                T::literal("toggle"),
            ],
        )
        .extract(Role::Event, ExtractionRule::Default { default: "click".into() })
        .extract(Role::Action, ExtractionRule::Default { default: "toggle".into() }),
        // Any event noun in the locative slot.
        LanguagePattern::new(
            "grammar-tr-event-toggle",
            CODE,
            "toggle",
            25,
            vec![
                T::role(Role::Patient),
                T::role(Role::Event),
                T::literal("toggle"),
            ],
        )
        .extract(Role::Action, ExtractionRule::Default { default: "toggle".into() }),
        // ".activei değiştir (sonra …)"
        LanguagePattern::new(
            "tr-toggle",
            CODE,
            "toggle",
            10,
            vec![
                T::role(Role::Patient),
                T::literal("toggle"),
                T::group(vec![T::literal("then"), T::greedy_role(Role::Continues)]),
            ],
        ),
        // "#listeye .itemi ekle" — destination, patient, verb.
        LanguagePattern::new(
            "tr-add-destination",
            CODE,
            "add",
            20,
            vec![
                T::role(Role::Destination),
                T::role(Role::Patient),
                T::literal("add"),
            ],
        ),
        LanguagePattern::new(
            "tr-add",
            CODE,
            "add",
            10,
            vec![T::role(Role::Patient), T::literal("add")],
        ),
        LanguagePattern::new(
            "tr-remove-source",
            CODE,
            "remove",
            20,
            vec![
                T::role(Role::Source),
                T::role(Role::Patient),
                T::literal("remove"),
            ],
        ),
        LanguagePattern::new(
            "tr-remove",
            CODE,
            "remove",
            10,
            vec![T::role(Role::Patient), T::literal("remove")],
        ),
        LanguagePattern::new(
            "tr-show",
            CODE,
            "show",
            10,
            vec![T::role(Role::Patient), T::literal("show")],
        ),
        LanguagePattern::new(
            "tr-hide",
            CODE,
            "hide",
            10,
            vec![T::role(Role::Patient), T::literal("hide")],
        ),
        // "X Y ayarla" — set X to Y.
        LanguagePattern::new(
            "tr-set",
            CODE,
            "set",
            10,
            vec![
                T::role(Role::Patient),
                T::role(Role::Goal),
                T::literal("set"),
            ],
        ),
        // "#kutuya .itemi koy"
        LanguagePattern::new(
            "tr-put-destination",
            CODE,
            "put",
            20,
            vec![
                T::role(Role::Destination),
                T::role(Role::Patient),
                T::literal("put"),
            ],
        ),
        LanguagePattern::new(
            "tr-put",
            CODE,
            "put",
            10,
            vec![T::role(Role::Patient), T::literal("put")],
        ),
        LanguagePattern::new(
            "tr-trigger",
            CODE,
            "trigger",
            10,
            vec![T::role(Role::Event), T::literal("trigger")],
        ),
        LanguagePattern::new(
            "tr-increment",
            CODE,
            "increment",
            10,
            vec![T::role(Role::Patient), T::literal("increment")],
        ),
        LanguagePattern::new(
            "tr-decrement",
            CODE,
            "decrement",
            10,
            vec![T::role(Role::Patient), T::literal("decrement")],
        ),
        LanguagePattern::new(
            "tr-log",
            CODE,
            "log",
            10,
            vec![T::role(Role::Patient), T::literal("log")],
        ),
        LanguagePattern::new(
            "tr-send-destination",
            CODE,
            "send",
            20,
            vec![
                T::role(Role::Destination),
                T::role(Role::Patient),
                T::literal("send"),
            ],
        ),
        LanguagePattern::new(
            "tr-send",
            CODE,
            "send",
            10,
            vec![T::role(Role::Patient), T::literal("send")],
        ),
        // "2s bekle"
        LanguagePattern::new(
            "tr-wait",
            CODE,
            "wait",
            10,
            vec![T::role(Role::Duration), T::literal("wait")],
        ),
        LanguagePattern::new(
            "tr-fetch",
            CODE,
            "fetch",
            10,
            vec![T::role(Role::Patient), T::literal("fetch")],
        ),
        // "#anasayfaya git"
        LanguagePattern::new(
            "tr-go",
            CODE,
            "go",
            10,
            vec![T::role(Role::Destination), T::literal("go")],
        ),
    ];
    PatternSet::new(patterns).expect("tr pattern set is well-formed")
}

/// Register the Turkish pack.
pub fn register(registry: &mut Registry) {
    registry.register_language(Box::new(TurkishTokenizer::new()), profile(), patterns());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accusative_suffix_is_stripped_from_selectors() {
        let stream = TurkishTokenizer::new().tokenize(".activei değiştir");
        assert_eq!(stream[0].surface, ".activei");
        assert_eq!(stream[0].normalized.as_deref(), Some(".active"));
        assert_eq!(stream[1].normalized.as_deref(), Some("toggle"));
    }

    #[test]
    fn plain_selectors_stay_intact() {
        // ".active" ends in a bare dative vowel shape; it must not strip.
        let stream = TurkishTokenizer::new().tokenize(".active göster");
        assert_eq!(stream[0].normalized, None);
        assert_eq!(stream[0].surface, ".active");
    }

    #[test]
    fn harmony_blocks_false_suffixes() {
        // "#menu" ends in accusative-shaped "u", but "u" does not harmonize
        // with the front stem vowel "e" of "#men".
        let stream = TurkishTokenizer::new().tokenize("#menu gizle");
        assert_eq!(stream[0].normalized, None);

        // "#buttonu" does harmonize ("o" then "u") and strips.
        let stream = TurkishTokenizer::new().tokenize("#buttonu gizle");
        assert_eq!(stream[0].normalized.as_deref(), Some("#button"));
    }

    #[test]
    fn dative_with_buffer_consonant_strips() {
        let stream = TurkishTokenizer::new().tokenize("#anasayfaya git");
        assert_eq!(stream[0].normalized.as_deref(), Some("#anasayfa"));
    }

    #[test]
    fn locative_keyword_resolves_through_its_stem() {
        let stream = TurkishTokenizer::new().tokenize("tıklamade bekle");
        assert_eq!(stream[0].kind, TokenKind::Keyword);
        assert_eq!(stream[0].normalized.as_deref(), Some("click"));
        assert_eq!(stream[0].surface, "tıklamade");
    }

    #[test]
    fn unknown_words_stay_identifiers_with_suffix_intact() {
        let stream = TurkishTokenizer::new().tokenize("kediler uyuyor");
        assert_eq!(stream[0].kind, TokenKind::Identifier);
        assert_eq!(stream[0].normalized, None);
    }

    #[test]
    fn standalone_lookup_strips_suffixes_like_tokenize() {
        let tokenizer = TurkishTokenizer::new();
        let hit = tokenizer.lookup_keyword("tıklamade").unwrap();
        assert_eq!(hit.canonical, "click");
        assert_eq!(hit.kind, KeywordKind::Event);
        assert_eq!(tokenizer.classify("tıklamade"), TokenKind::Keyword);
    }

    #[test]
    fn case_folds_turkish_capitals() {
        let tokenizer = TurkishTokenizer::new();
        assert_eq!(
            tokenizer.lookup_keyword("GÖSTER").map(|k| k.canonical.as_str()),
            Some("show")
        );
    }

    #[test]
    fn pattern_set_builds() {
        assert!(!patterns().is_empty());
    }
}
