//! Per-language lexical grammars for string literals and comments.
//!
//! Every grammar is a single regex made of named alternatives. The lexer walks
//! the text leftmost-first, so whichever construct starts earlier wins: a `"`
//! inside a comment is never seen as a literal, and `//` inside a string is
//! never seen as a comment.
//!
//! ## Group names
//!
//! - `comment`: a comment region
//! - `verbatim`: a long-form literal (`@"..."`)
//! - `quoted`: a simple quoted literal or attribute value
//! - `text`: bare inner text between markup tags (whitespace is trimmed)
//!
//! Any other group (`char`, `interpolated`, `code`, `markup`, `directive`,
//! ...) is consumed and skipped, which keeps literal-looking text inside it
//! out of the results.

use std::{fmt, path::Path, sync::LazyLock};

use regex::{Captures, Regex};
use serde::Serialize;

use crate::core::span::LiteralSpan;
use crate::error::{Error, Result};

/// Language or markup a document is lexed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarVariant {
    CSharp,
    VisualBasic,
    Xaml,
    CSharpRazor,
    VbRazor,
    Aspx,
}

impl GrammarVariant {
    pub const ALL: [GrammarVariant; 6] = [
        GrammarVariant::CSharp,
        GrammarVariant::VisualBasic,
        GrammarVariant::Xaml,
        GrammarVariant::CSharpRazor,
        GrammarVariant::VbRazor,
        GrammarVariant::Aspx,
    ];

    /// Select the variant from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "cs" => Some(GrammarVariant::CSharp),
            "vb" => Some(GrammarVariant::VisualBasic),
            "xaml" => Some(GrammarVariant::Xaml),
            "cshtml" => Some(GrammarVariant::CSharpRazor),
            "vbhtml" => Some(GrammarVariant::VbRazor),
            "aspx" | "ascx" | "master" => Some(GrammarVariant::Aspx),
            _ => None,
        }
    }

    /// The code language hosting this variant. Razor files delegate to C# or VB.
    pub fn host(self) -> GrammarVariant {
        match self {
            GrammarVariant::CSharpRazor => GrammarVariant::CSharp,
            GrammarVariant::VbRazor => GrammarVariant::VisualBasic,
            other => other,
        }
    }

    pub fn is_razor(self) -> bool {
        matches!(self, GrammarVariant::CSharpRazor | GrammarVariant::VbRazor)
    }

    /// Built-in grammar for this variant, compiled on first use.
    pub fn grammar(self) -> &'static LiteralGrammar {
        match self {
            GrammarVariant::CSharp => &CSHARP_GRAMMAR,
            GrammarVariant::VisualBasic => &VB_GRAMMAR,
            GrammarVariant::Xaml => &XAML_GRAMMAR,
            GrammarVariant::CSharpRazor => &CSHARP_RAZOR_GRAMMAR,
            GrammarVariant::VbRazor => &VB_RAZOR_GRAMMAR,
            GrammarVariant::Aspx => &ASPX_GRAMMAR,
        }
    }
}

impl fmt::Display for GrammarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrammarVariant::CSharp => "C#",
            GrammarVariant::VisualBasic => "VB",
            GrammarVariant::Xaml => "XAML",
            GrammarVariant::CSharpRazor => "C# Razor",
            GrammarVariant::VbRazor => "VB Razor",
            GrammarVariant::Aspx => "ASPX",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Comment,
    Verbatim,
    Quoted,
    Text,
}

impl TokenKind {
    pub fn is_literal(self) -> bool {
        !matches!(self, TokenKind::Comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: LiteralSpan,
}

const LITERAL_GROUPS: [(&str, TokenKind); 3] = [
    ("verbatim", TokenKind::Verbatim),
    ("quoted", TokenKind::Quoted),
    ("text", TokenKind::Text),
];

const CSHARP_PATTERN: &str = concat!(
    r#"(?P<comment>//[^\n]*|/\*(?s:.*?)\*/)"#,
    r#"|(?P<raw>"""(?s:.*?)""")"#,
    r#"|(?P<interpolated>(?:\$@|@\$)"(?:[^"]|"")*"|\$"(?:[^"\\\n]|\\[^\n])*")"#,
    r#"|(?P<char>'(?:[^'\\\n]|\\[^\n]){1,10}')"#,
    r#"|(?P<verbatim>@"(?:[^"]|"")*")"#,
    r#"|(?P<quoted>"(?:[^"\\\n]|\\[^\n])*")"#,
);

const VB_PATTERN: &str = concat!(
    r#"(?P<comment>'[^\n]*|(?i:\bREM\b)[^\n]*)"#,
    r#"|(?P<interpolated>\$"(?:[^"\n]|"")*")"#,
    r#"|(?P<char>"(?:[^"\n]|"")"[cC]\b)"#,
    r#"|(?P<quoted>"(?:[^"\n]|"")*")"#,
);

const XAML_PATTERN: &str = concat!(
    r#"(?P<comment><!--(?s:.*?)-->)"#,
    r#"|(?P<cdata><!\[CDATA\[(?s:.*?)\]\]>)"#,
    r#"|(?P<markup><\?(?s:.*?)\?>)"#,
    r#"|(?P<namespace>\bxmlns(?::[\w.\-]+)?\s*=\s*(?:"[^"]*"|'[^']*'))"#,
    r#"|(?P<extension>=\s*(?:"\{[^"]*"|'\{[^']*'))"#,
    r#"|(?P<directive>\b(?:(?:x|mc|d):[\w.]+|Name)\s*=\s*(?:"[^"]*"|'[^']*'))"#,
    r#"|=\s*(?P<quoted>"[^"<]*"|'[^'<]*')"#,
);

const CSHARP_RAZOR_PATTERN: &str = concat!(
    r#"(?P<comment>@\*(?s:.*?)\*@|<!--(?s:.*?)-->|//[^\n]*|/\*(?s:.*?)\*/)"#,
    r#"|(?P<markup>(?i:<script\b(?s:.*?)</script>|<style\b(?s:.*?)</style>))"#,
    r#"|(?P<raw>"""(?s:.*?)""")"#,
    r#"|(?P<interpolated>(?:\$@|@\$)"(?:[^"]|"")*"|\$"(?:[^"\\\n]|\\[^\n])*")"#,
    r#"|(?P<verbatim>@"(?:[^"]|"")*")"#,
    r#"|(?P<quoted>"(?:[^"\\\n]|\\[^\n])*")"#,
    r#"|>(?P<text>[^<>@{}"]*?\p{L}[^<>@{}"]*)[<@]"#,
);

// VB comments only count at the start of a code line, so an apostrophe in
// markup prose is left alone.
const VB_RAZOR_PATTERN: &str = concat!(
    r#"(?P<comment>@\*(?s:.*?)\*@|<!--(?s:.*?)-->|(?m:^[ \t]*'[^\n]*)|(?im:^[ \t]*REM\b[^\n]*))"#,
    r#"|(?P<markup>(?i:<script\b(?s:.*?)</script>|<style\b(?s:.*?)</style>))"#,
    r#"|(?P<char>"(?:[^"\n]|"")"[cC]\b)"#,
    r#"|(?P<quoted>"(?:[^"\n]|"")*")"#,
    r#"|>(?P<text>[^<>@{}"]*?\p{L}[^<>@{}"]*)[<@]"#,
);

const ASPX_PATTERN: &str = concat!(
    r#"(?P<comment><%--(?s:.*?)--%>|<!--(?s:.*?)-->)"#,
    r#"|(?P<code><%(?s:.*?)%>)"#,
    r#"|(?P<markup>(?i:<script\b(?s:.*?)</script>|<style\b(?s:.*?)</style>))"#,
    r#"|(?P<directive>(?i:\b(?:runat|id|clientidmode|enableviewstate)\s*=\s*(?:"[^"]*"|'[^']*')))"#,
    r#"|=\s*(?P<quoted>"[^"<]*"|'[^'<]*')"#,
    r#"|>(?P<text>[^<>]*?\p{L}[^<>]*)<"#,
);

static CSHARP_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::CSharp, CSHARP_PATTERN).unwrap()
});

static VB_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::VisualBasic, VB_PATTERN).unwrap()
});

static XAML_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::Xaml, XAML_PATTERN).unwrap()
});

static CSHARP_RAZOR_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::CSharpRazor, CSHARP_RAZOR_PATTERN).unwrap()
});

static VB_RAZOR_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::VbRazor, VB_RAZOR_PATTERN).unwrap()
});

static ASPX_GRAMMAR: LazyLock<LiteralGrammar> = LazyLock::new(|| {
    LiteralGrammar::from_pattern(GrammarVariant::Aspx, ASPX_PATTERN).unwrap()
});

/// Compiled lexer for one grammar variant.
#[derive(Debug, Clone)]
pub struct LiteralGrammar {
    variant: GrammarVariant,
    lexer: Regex,
}

impl LiteralGrammar {
    /// Compile a grammar from a lexer pattern.
    ///
    /// The pattern must compile and declare at least one of the `verbatim`,
    /// `quoted` or `text` groups.
    pub fn from_pattern(variant: GrammarVariant, pattern: &str) -> Result<Self> {
        let lexer = Regex::new(pattern).map_err(|e| Error::InvalidGrammar {
            variant: variant.to_string(),
            reason: e.to_string(),
        })?;

        let has_literal_group = lexer
            .capture_names()
            .flatten()
            .any(|name| LITERAL_GROUPS.iter().any(|(group, _)| *group == name));
        if !has_literal_group {
            return Err(Error::InvalidGrammar {
                variant: variant.to_string(),
                reason: "pattern declares no `verbatim`, `quoted` or `text` group".to_string(),
            });
        }

        Ok(Self { variant, lexer })
    }

    pub fn variant(&self) -> GrammarVariant {
        self.variant
    }

    /// Lex `text` into comment and literal tokens, in ascending order.
    pub fn tokens<'g, 't>(&'g self, text: &'t str) -> Tokens<'g, 't> {
        Tokens {
            grammar: self,
            text,
            pos: 0,
        }
    }

    /// Every literal span in `text`.
    pub fn literals<'g, 't>(&'g self, text: &'t str) -> impl Iterator<Item = Token> {
        self.tokens(text).filter(|token| token.kind.is_literal())
    }

    /// Every comment span in `text`.
    pub fn comments<'g, 't>(
        &'g self,
        text: &'t str,
    ) -> impl Iterator<Item = LiteralSpan> {
        self.tokens(text)
            .filter(|token| token.kind == TokenKind::Comment)
            .map(|token| token.span)
    }

    /// Replace comments, literals and skipped constructs with spaces.
    ///
    /// Newlines survive and byte offsets are unchanged, so line-oriented
    /// scanners can run over the result without tripping on quoted text.
    pub fn mask(&self, text: &str) -> String {
        let mut bytes = text.as_bytes().to_vec();
        let mut pos = 0;
        while let Some(caps) = self.lexer.captures_at(text, pos) {
            let Some(whole) = caps.get(0) else { break };
            // bare text is prose, not code
            let resume = match caps.name("text") {
                Some(m) => m.end(),
                None => {
                    for byte in &mut bytes[whole.range()] {
                        if *byte != b'\n' {
                            *byte = b' ';
                        }
                    }
                    whole.end()
                }
            };
            pos = advance(text, whole.start(), resume);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn classify(&self, text: &str, caps: &Captures<'_>) -> (Option<Token>, usize) {
        let Some(whole) = caps.get(0) else {
            return (None, text.len());
        };

        if caps.name("comment").is_some() {
            let token = Token {
                kind: TokenKind::Comment,
                span: LiteralSpan::new(whole.start(), whole.end()),
            };
            return (Some(token), whole.end());
        }

        for (group, kind) in LITERAL_GROUPS {
            let Some(m) = caps.name(group) else { continue };
            if kind == TokenKind::Text {
                // The delimiter after the text belongs to the next token.
                let body = m.as_str();
                let start = m.start() + (body.len() - body.trim_start().len());
                let end = start + body.trim().len();
                let token = Token {
                    kind,
                    span: LiteralSpan::new(start, end),
                };
                return (Some(token), m.end());
            }
            let token = Token {
                kind,
                span: LiteralSpan::new(m.start(), m.end()),
            };
            return (Some(token), whole.end());
        }

        (None, whole.end())
    }
}

/// Resume position after a match, always past `start`.
fn advance(text: &str, start: usize, resume: usize) -> usize {
    if resume > start {
        return resume;
    }
    start + text[start..].chars().next().map_or(1, char::len_utf8)
}

/// Iterator over the tokens of a text, see [`LiteralGrammar::tokens`].
pub struct Tokens<'g, 't> {
    grammar: &'g LiteralGrammar,
    text: &'t str,
    pos: usize,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos <= self.text.len() {
            let caps = self.grammar.lexer.captures_at(self.text, self.pos)?;
            let start = caps.get(0)?.start();
            let (token, resume) = self.grammar.classify(self.text, &caps);
            self.pos = advance(self.text, start, resume);
            if token.is_some() {
                return token;
            }
        }
        None
    }
}
