//! Japanese language pack.
//!
//! SOV order, grammatical particles mark roles, and inter-word spacing is
//! optional — the same command must tokenize identically with and without
//! spaces. Segmentation is therefore dictionary-driven: at each position the
//! tokenizer first tries a longest match against the keyword table, then a
//! particle, and only then accumulates the character into an identifier run.
//! Particles are emitted as operator tokens so patterns can anchor on them.

use koine::keyword::{KeywordKind, KeywordRow, KeywordTable, NormalizedKeyword};
use koine::pattern::{ExtractionRule, LanguagePattern, PatternSet, TemplateToken};
use koine::profile::{Direction, LanguageProfile, MarkingStrategy, WordOrder};
use koine::registry::Registry;
use koine::role::{Role, RoleMarker};
use koine::scan::{self, Cursor};
use koine::token::{LanguageToken, Span, TokenKind, TokenStream};
use koine::tokenizer::Tokenizer;

pub const CODE: &str = "ja";

/// Longest first, so まで is never read as ま + で.
const PARTICLES: [&str; 7] = ["から", "まで", "を", "に", "へ", "の", "で"];

pub fn keyword_rows() -> Vec<KeywordRow> {
    use KeywordKind::*;
    vec![
        KeywordRow::new("toggle", Command, &["切り替える", "切り替え", "切替"]),
        KeywordRow::new("add", Command, &["追加"]),
        KeywordRow::new("remove", Command, &["削除"]),
        KeywordRow::new("show", Command, &["表示"]),
        KeywordRow::new("hide", Command, &["非表示", "隠す"]),
        KeywordRow::new("set", Command, &["設定"]),
        KeywordRow::new("put", Command, &["置く"]),
        KeywordRow::new("increment", Command, &["増加"]),
        KeywordRow::new("decrement", Command, &["減少"]),
        KeywordRow::new("log", Command, &["記録"]),
        KeywordRow::new("send", Command, &["送信"]),
        KeywordRow::new("trigger", Command, &["発火"]),
        KeywordRow::new("wait", Command, &["待機", "待つ"]),
        KeywordRow::new("fetch", Command, &["取得"]),
        KeywordRow::new("go", Command, &["移動"]),
        KeywordRow::new("then", Marker, &["それから", "そして"]),
        KeywordRow::new("click", Event, &["クリック"]),
        KeywordRow::new("submit", Event, &["提出"]),
        KeywordRow::new("change", Event, &["変更"]),
        KeywordRow::new("load", Event, &["読み込み"]),
    ]
}

pub struct JapaneseTokenizer {
    keywords: KeywordTable,
    longest_keyword: usize,
}

impl JapaneseTokenizer {
    pub fn new() -> Self {
        let keywords = KeywordTable::new(keyword_rows());
        let longest_keyword = keywords.longest_spelling();
        JapaneseTokenizer {
            keywords,
            longest_keyword,
        }
    }

    /// Longest keyword spelling starting at the cursor, if any.
    fn keyword_at(&self, cursor: &Cursor) -> Option<(NormalizedKeyword, usize)> {
        let at = cursor.pos();
        for len in (1..=self.longest_keyword).rev() {
            if cursor.peek_at(len - 1).is_none() {
                continue;
            }
            let candidate = cursor.slice(at, at + len);
            if let Some(hit) = self.keywords.lookup(&candidate) {
                return Some((hit.clone(), len));
            }
        }
        None
    }

    fn particle_at(&self, cursor: &Cursor) -> Option<usize> {
        PARTICLES
            .iter()
            .find(|p| cursor.starts_with(p))
            .map(|p| p.chars().count())
    }

    fn flush(
        &self,
        pending: &mut Option<usize>,
        cursor: &Cursor,
        tokens: &mut Vec<LanguageToken>,
        end: usize,
    ) {
        if let Some(start) = pending.take() {
            let word = cursor.slice(start, end);
            let token = match self.keywords.lookup(&word) {
                Some(hit) => LanguageToken::new(word, TokenKind::Keyword, Span::new(start, end))
                    .with_normalized(hit.canonical.clone()),
                None => LanguageToken::new(word, TokenKind::Identifier, Span::new(start, end)),
            };
            tokens.push(token);
        }
    }
}

impl Default for JapaneseTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JapaneseTokenizer {
    fn language(&self) -> &str {
        CODE
    }

    fn tokenize(&self, input: &str) -> TokenStream {
        let mut cursor = Cursor::new(input);
        let mut tokens = Vec::new();
        let mut pending: Option<usize> = None;

        while let Some(ch) = cursor.peek() {
            let at = cursor.pos();
            if ch.is_whitespace() {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                cursor.advance();
                continue;
            }
            if let Some(token) = scan::scan_selector(&mut cursor, scan::is_ascii_selector_char)
            {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                tokens.push(token);
                continue;
            }
            if let Some(token) = scan::scan_string(&mut cursor) {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                tokens.push(token);
                continue;
            }
            // Numbers, URLs, and sigils only start at a token boundary;
            // a digit inside "xyz123" must not split the word.
            if pending.is_none() {
                if let Some(token) = scan::scan_number(&mut cursor) {
                    tokens.push(token);
                    continue;
                }
                if let Some(token) = scan::scan_url(&mut cursor) {
                    tokens.push(token);
                    continue;
                }
                if let Some(token) = scan::scan_sigil(&mut cursor) {
                    tokens.push(token);
                    continue;
                }
            }
            if scan::is_operator_char(ch) {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                cursor.advance();
                tokens.push(LanguageToken::new(
                    ch.to_string(),
                    TokenKind::Operator,
                    Span::new(at, at + 1),
                ));
                continue;
            }
            if let Some((hit, len)) = self.keyword_at(&cursor) {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                cursor.advance_by(len);
                let surface = cursor.slice(at, at + len);
                tokens.push(
                    LanguageToken::new(surface, TokenKind::Keyword, Span::new(at, at + len))
                        .with_normalized(hit.canonical),
                );
                continue;
            }
            if let Some(len) = self.particle_at(&cursor) {
                self.flush(&mut pending, &cursor, &mut tokens, at);
                cursor.advance_by(len);
                let surface = cursor.slice(at, at + len);
                tokens.push(LanguageToken::new(
                    surface,
                    TokenKind::Operator,
                    Span::new(at, at + len),
                ));
                continue;
            }
            if pending.is_none() {
                pending = Some(at);
            }
            cursor.advance();
        }
        let end = cursor.pos();
        self.flush(&mut pending, &cursor, &mut tokens, end);
        TokenStream::new(CODE, tokens)
    }

    fn lookup_keyword(&self, surface: &str) -> Option<&NormalizedKeyword> {
        self.keywords.lookup(surface)
    }
}

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        code: CODE.into(),
        name: "Japanese".into(),
        native_name: "日本語".into(),
        direction: Direction::Ltr,
        word_order: WordOrder::Sov,
        marking: MarkingStrategy::Particle,
        uses_spaces: false,
        role_markers: vec![
            RoleMarker::new("を", Role::Patient),
            RoleMarker::new("に", Role::Destination),
            RoleMarker::new("へ", Role::Destination),
            RoleMarker::new("から", Role::Source),
            RoleMarker::new("まで", Role::Goal),
            RoleMarker::new("で", Role::Event),
        ],
    }
}

/// Japanese pattern set. Arguments come before the verb; particles anchor
/// the role slots, so every slot is bounded and the verb literal closes the
/// template.
pub fn patterns() -> PatternSet {
    use TemplateToken as T;

    let patterns = vec![
        // "クリックで .active を 切り替え"
        LanguagePattern::new(
            "ja-event-toggle",
            CODE,
            "toggle",
            30,
            vec![
                T::role(Role::Event),
                T::literal("で"),
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("toggle"),
            ],
        )
        .extract(Role::Action, ExtractionRule::Default { default: "toggle".into() }),
        // "#button の .active を 切り替え (それから …)"
        LanguagePattern::new(
            "ja-toggle-destination",
            CODE,
            "toggle",
            20,
            vec![
                T::role(Role::Destination),
                T::literal("の"),
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("toggle"),
                T::group(vec![T::literal("then"), T::greedy_role(Role::Continues)]),
            ],
        ),
        // ".active を 切り替え"
        LanguagePattern::new(
            "ja-toggle",
            CODE,
            "toggle",
            10,
            vec![
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("toggle"),
            ],
        ),
        // ".active 切り替え" (particle elided)
        LanguagePattern::new(
            "ja-toggle-bare",
            CODE,
            "toggle",
            5,
            vec![T::role(Role::Patient), T::literal("toggle")],
        ),
        LanguagePattern::new(
            "ja-add-destination",
            CODE,
            "add",
            20,
            vec![
                T::role(Role::Destination),
                T::literal("に"),
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("add"),
            ],
        ),
        LanguagePattern::new(
            "ja-add",
            CODE,
            "add",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("add")],
        ),
        LanguagePattern::new(
            "ja-remove-source",
            CODE,
            "remove",
            20,
            vec![
                T::role(Role::Source),
                T::literal("から"),
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("remove"),
            ],
        ),
        LanguagePattern::new(
            "ja-remove",
            CODE,
            "remove",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("remove")],
        ),
        LanguagePattern::new(
            "ja-show",
            CODE,
            "show",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("show")],
        ),
        LanguagePattern::new(
            "ja-hide",
            CODE,
            "hide",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("hide")],
        ),
        // "X を Y に 設定"
        LanguagePattern::new(
            "ja-set",
            CODE,
            "set",
            10,
            vec![
                T::role(Role::Patient),
                T::literal("を"),
                T::role(Role::Goal),
                T::literal("に"),
                T::literal("set"),
            ],
        ),
        LanguagePattern::new(
            "ja-put",
            CODE,
            "put",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("put")],
        ),
        LanguagePattern::new(
            "ja-increment",
            CODE,
            "increment",
            10,
            vec![
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("increment"),
            ],
        ),
        LanguagePattern::new(
            "ja-decrement",
            CODE,
            "decrement",
            10,
            vec![
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("decrement"),
            ],
        ),
        LanguagePattern::new(
            "ja-log",
            CODE,
            "log",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("log")],
        ),
        // "#button で クリック を 発火"
        LanguagePattern::new(
            "ja-trigger-destination",
            CODE,
            "trigger",
            20,
            vec![
                T::role(Role::Destination),
                T::literal("で"),
                T::role(Role::Event),
                T::literal("を"),
                T::literal("trigger"),
            ],
        ),
        LanguagePattern::new(
            "ja-trigger",
            CODE,
            "trigger",
            10,
            vec![T::role(Role::Event), T::literal("を"), T::literal("trigger")],
        ),
        LanguagePattern::new(
            "ja-send",
            CODE,
            "send",
            20,
            vec![
                T::role(Role::Destination),
                T::literal("に"),
                T::role(Role::Patient),
                T::literal("を"),
                T::literal("send"),
            ],
        ),
        LanguagePattern::new(
            "ja-send-bare",
            CODE,
            "send",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("send")],
        ),
        // "2s 待機"
        LanguagePattern::new(
            "ja-wait",
            CODE,
            "wait",
            10,
            vec![T::role(Role::Duration), T::literal("wait")],
        ),
        LanguagePattern::new(
            "ja-fetch",
            CODE,
            "fetch",
            10,
            vec![T::role(Role::Patient), T::literal("を"), T::literal("fetch")],
        ),
        // "#a から #b へ 移動"
        LanguagePattern::new(
            "ja-go-source",
            CODE,
            "go",
            20,
            vec![
                T::role(Role::Source),
                T::literal("から"),
                T::role(Role::Destination),
                T::literal_with("へ", &["に"]),
                T::literal("go"),
            ],
        ),
        LanguagePattern::new(
            "ja-go",
            CODE,
            "go",
            10,
            vec![
                T::role(Role::Destination),
                T::literal_with("へ", &["に"]),
                T::literal("go"),
            ],
        ),
    ];
    PatternSet::new(patterns).expect("ja pattern set is well-formed")
}

/// Register the Japanese pack.
pub fn register(registry: &mut Registry) {
    registry.register_language(Box::new(JapaneseTokenizer::new()), profile(), patterns());
}
