//! English language pack.
//!
//! English is the reference language: SVO order, prepositions mark roles,
//! whitespace separates words. The tokenizer is a direct composition of the
//! shared sub-scanners plus a keyword-classified word scanner.

use koine::keyword::{KeywordKind, KeywordRow, KeywordTable, NormalizedKeyword};
use koine::pattern::{ExtractionRule, LanguagePattern, PatternSet, TemplateToken};
use koine::profile::{Direction, LanguageProfile, MarkingStrategy, WordOrder};
use koine::registry::Registry;
use koine::role::{Role, RoleMarker};
use koine::scan::{self, Cursor};
use koine::token::{LanguageToken, Span, TokenKind, TokenStream};
use koine::tokenizer::Tokenizer;

pub const CODE: &str = "en";

pub fn keyword_rows() -> Vec<KeywordRow> {
    use KeywordKind::*;
    vec![
        // Commands.
        KeywordRow::new("toggle", Command, &["toggle"]),
        KeywordRow::new("add", Command, &["add"]),
        KeywordRow::new("remove", Command, &["remove", "delete"]),
        KeywordRow::new("show", Command, &["show", "reveal"]),
        KeywordRow::new("hide", Command, &["hide"]),
        KeywordRow::new("set", Command, &["set"]),
        KeywordRow::new("put", Command, &["put"]),
        KeywordRow::new("increment", Command, &["increment"]),
        KeywordRow::new("decrement", Command, &["decrement"]),
        KeywordRow::new("log", Command, &["log"]),
        KeywordRow::new("send", Command, &["send"]),
        KeywordRow::new("trigger", Command, &["trigger"]),
        KeywordRow::new("wait", Command, &["wait"]),
        KeywordRow::new("fetch", Command, &["fetch"]),
        KeywordRow::new("go", Command, &["go", "navigate"]),
        KeywordRow::new("take", Command, &["take"]),
        KeywordRow::new("call", Command, &["call"]),
        KeywordRow::new("get", Command, &["get"]),
        // Role markers.
        KeywordRow::new("on", Marker, &["on", "onto"]),
        KeywordRow::new("to", Marker, &["to"]),
        KeywordRow::new("from", Marker, &["from"]),
        KeywordRow::new("into", Marker, &["into"]),
        KeywordRow::new("then", Marker, &["then"]),
        KeywordRow::new("for", Marker, &["for"]),
        KeywordRow::new("in", Marker, &["in"]),
        KeywordRow::new("at", Marker, &["at"]),
        // Event nouns.
        KeywordRow::new("click", Event, &["click"]),
        KeywordRow::new("submit", Event, &["submit"]),
        KeywordRow::new("change", Event, &["change"]),
        KeywordRow::new("load", Event, &["load"]),
        // Noise.
        KeywordRow::new("the", Noise, &["the"]),
    ]
}

pub struct EnglishTokenizer {
    keywords: KeywordTable,
}

impl EnglishTokenizer {
    pub fn new() -> Self {
        EnglishTokenizer {
            keywords: KeywordTable::new(keyword_rows()),
        }
    }

    fn word_token(&self, word: String, span: Span) -> LanguageToken {
        match self.keywords.lookup(&word) {
            Some(hit) => LanguageToken::new(word, TokenKind::Keyword, span)
                .with_normalized(hit.canonical.clone()),
            None => LanguageToken::new(word, TokenKind::Identifier, span),
        }
    }
}

impl Default for EnglishTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '\''
}

impl Tokenizer for EnglishTokenizer {
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
            if let Some(token) = scan::scan_selector(&mut cursor, scan::is_ascii_selector_char)
            {
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
                // Unrecognized character; skip, never fail.
                cursor.advance();
            }
        }
        TokenStream::new(CODE, tokens)
    }

    fn lookup_keyword(&self, surface: &str) -> Option<&NormalizedKeyword> {
        self.keywords.lookup(surface)
    }
}

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        code: CODE.into(),
        name: "English".into(),
        native_name: "English".into(),
        direction: Direction::Ltr,
        word_order: WordOrder::Svo,
        marking: MarkingStrategy::Preposition,
        uses_spaces: true,
        role_markers: vec![
            RoleMarker::new("on", Role::Destination),
            RoleMarker::new("to", Role::Destination),
            RoleMarker::new("into", Role::Destination),
            RoleMarker::new("from", Role::Source),
            RoleMarker::new("at", Role::Position),
            RoleMarker::new("for", Role::Duration),
            RoleMarker::new("then", Role::Continues),
        ],
    }
}

/// English pattern set. Specific multi-role forms carry the higher
/// priorities; the bare greedy forms sit at the bottom so they only catch
/// what nothing else claimed.
pub fn patterns() -> PatternSet {
    use TemplateToken as T;
    let then_group = || T::group(vec![T::literal("then"), T::greedy_role(Role::Continues)]);

    let patterns = vec![
        // "on click toggle .active (on #button)"
        LanguagePattern::new(
            "en-on-click-toggle",
            CODE,
            "toggle",
            40,
            vec![
                T::literal("on"),
                T::literal("click"),
                T::literal("toggle"),
                T::role(Role::Patient),
                T::group(vec![T::literal("on"), T::role(Role::Destination)]),
            ],
        )
        .extract(Role::Event, ExtractionRule::Default { default: "click".into() })
        .extract(Role::Action, ExtractionRule::Default { default: "toggle".into() }),
        // "on <event> toggle .active"
        LanguagePattern::new(
            "en-on-event-toggle",
            CODE,
            "toggle",
            35,
            vec![
                T::literal("on"),
                T::role(Role::Event),
                T::literal("toggle"),
                T::role(Role::Patient),
            ],
        )
        .extract(Role::Action, ExtractionRule::Default { default: "toggle".into() }),
        // "toggle .active on #button (then …)"
        LanguagePattern::new(
            "en-toggle-on",
            CODE,
            "toggle",
            20,
            vec![
                T::literal("toggle"),
                T::role(Role::Patient),
                T::literal("on"),
                T::role(Role::Destination),
                then_group(),
            ],
        ),
        // "toggle .active (then …)"
        LanguagePattern::new(
            "en-toggle",
            CODE,
            "toggle",
            10,
            vec![T::literal("toggle"), T::greedy_role(Role::Patient), then_group()],
        ),
        LanguagePattern::new(
            "en-add-to",
            CODE,
            "add",
            20,
            vec![
                T::literal("add"),
                T::role(Role::Patient),
                T::literal("to"),
                T::role(Role::Destination),
            ],
        ),
        LanguagePattern::new(
            "en-add",
            CODE,
            "add",
            10,
            vec![T::literal("add"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-remove-from",
            CODE,
            "remove",
            20,
            vec![
                T::literal("remove"),
                T::role(Role::Patient),
                T::literal("from"),
                T::role(Role::Source),
            ],
        )
        .extract(Role::Source, ExtractionRule::Marker { marker: "from".into() }),
        LanguagePattern::new(
            "en-remove",
            CODE,
            "remove",
            10,
            vec![T::literal("remove"), T::greedy_role(Role::Patient)],
        ),
        // "show (the) .sidebar" — the article is tolerated noise.
        LanguagePattern::new(
            "en-show",
            CODE,
            "show",
            10,
            vec![
                T::literal("show"),
                T::group(vec![T::literal("the")]),
                T::greedy_role(Role::Patient),
            ],
        ),
        LanguagePattern::new(
            "en-hide",
            CODE,
            "hide",
            10,
            vec![
                T::literal("hide"),
                T::group(vec![T::literal("the")]),
                T::greedy_role(Role::Patient),
            ],
        ),
        LanguagePattern::new(
            "en-set-to",
            CODE,
            "set",
            20,
            vec![
                T::literal("set"),
                T::role(Role::Patient),
                T::literal("to"),
                T::greedy_role(Role::Goal),
            ],
        ),
        LanguagePattern::new(
            "en-set",
            CODE,
            "set",
            10,
            vec![T::literal("set"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-put-into",
            CODE,
            "put",
            20,
            vec![
                T::literal("put"),
                T::role(Role::Patient),
                T::literal("into"),
                T::role(Role::Destination),
            ],
        ),
        LanguagePattern::new(
            "en-increment",
            CODE,
            "increment",
            10,
            vec![T::literal("increment"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-decrement",
            CODE,
            "decrement",
            10,
            vec![T::literal("decrement"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-log",
            CODE,
            "log",
            10,
            vec![T::literal("log"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-send-to",
            CODE,
            "send",
            20,
            vec![
                T::literal("send"),
                T::role(Role::Patient),
                T::literal("to"),
                T::role(Role::Destination),
            ],
        ),
        LanguagePattern::new(
            "en-send",
            CODE,
            "send",
            10,
            vec![T::literal("send"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-trigger-on",
            CODE,
            "trigger",
            20,
            vec![
                T::literal("trigger"),
                T::role(Role::Event),
                T::literal("on"),
                T::role(Role::Destination),
            ],
        ),
        LanguagePattern::new(
            "en-trigger",
            CODE,
            "trigger",
            10,
            vec![T::literal("trigger"), T::role(Role::Event)],
        ),
        // "wait 2s" / "wait for 2s"
        LanguagePattern::new(
            "en-wait",
            CODE,
            "wait",
            10,
            vec![
                T::literal("wait"),
                T::group(vec![T::literal("for")]),
                T::role(Role::Duration),
            ],
        ),
        LanguagePattern::new(
            "en-fetch",
            CODE,
            "fetch",
            10,
            vec![T::literal("fetch"), T::role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-go-to",
            CODE,
            "go",
            10,
            vec![T::literal("go"), T::literal("to"), T::role(Role::Destination)],
        ),
        LanguagePattern::new(
            "en-take",
            CODE,
            "take",
            10,
            vec![T::literal("take"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-call",
            CODE,
            "call",
            10,
            vec![T::literal("call"), T::greedy_role(Role::Patient)],
        ),
        LanguagePattern::new(
            "en-get",
            CODE,
            "get",
            10,
            vec![T::literal("get"), T::greedy_role(Role::Patient)],
        ),
    ];
    // The set above is hand-maintained and validated in tests; construction
    // cannot fail once those pass.
    PatternSet::new(patterns).expect("en pattern set is well-formed")
}

/// Register the English pack.
pub fn register(registry: &mut Registry) {
    registry.register_language(Box::new(EnglishTokenizer::new()), profile(), patterns());
}
