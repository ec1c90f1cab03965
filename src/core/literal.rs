use std::cell::OnceCell;

use crate::core::{
    codec::{self, Decoded},
    grammar::GrammarVariant,
    matcher::LiteralMatcher,
    span::{LiteralSpan, MatchResult},
};
use crate::error::{Error, Result};

/// A literal of interest inside one document.
///
/// The decoded value is computed on first access and kept for the lifetime of
/// the instance. Once its document is edited the instance is stale; build a
/// new one from the updated text instead of reusing it.
#[derive(Debug, Clone)]
pub struct HardCodedString {
    document: String,
    variant: GrammarVariant,
    span: LiteralSpan,
    raw: String,
    line: usize,
    column: usize,
    from_selection: bool,
    decoded: OnceCell<Decoded>,
}

impl HardCodedString {
    /// Wrap an already known span of `text`.
    pub fn new(
        document: impl Into<String>,
        variant: GrammarVariant,
        text: &str,
        span: LiteralSpan,
    ) -> Result<Self> {
        let raw = span.slice(text).ok_or(Error::SpanOutOfRange {
            start: span.start,
            end: span.end,
            len: text.len(),
        })?;

        let before = &text[..span.start];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);

        Ok(Self {
            document: document.into(),
            variant,
            span,
            raw: raw.to_string(),
            line: before.matches('\n').count(),
            column: before[line_start..].chars().count(),
            from_selection: false,
            decoded: OnceCell::new(),
        })
    }

    /// Resolve a selection of `text` to a literal.
    ///
    /// Fails with [`Error::NotALiteral`] when the selection is empty and sits
    /// outside every literal.
    pub fn locate(
        document: impl Into<String>,
        variant: GrammarVariant,
        text: &str,
        sel_start: usize,
        sel_end: usize,
    ) -> Result<Self> {
        let matcher = LiteralMatcher::new(variant.grammar());
        match matcher.locate_literal(text, sel_start, sel_end) {
            MatchResult::Found(span) => Self::new(document, variant, text, span),
            MatchResult::Selection(span) => {
                let mut literal = Self::new(document, variant, text, span)?;
                literal.from_selection = true;
                Ok(literal)
            }
            MatchResult::NotFound => Err(Error::NotALiteral),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn variant(&self) -> GrammarVariant {
        self.variant
    }

    pub fn span(&self) -> LiteralSpan {
        self.span
    }

    /// Literal exactly as written, delimiters included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 0-based line of the first char.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based column (in chars) of the first char.
    pub fn column(&self) -> usize {
        self.column
    }

    /// True when no grammar literal matched and the raw selection was taken.
    pub fn from_selection(&self) -> bool {
        self.from_selection
    }

    pub fn decoded(&self) -> &Decoded {
        self.decoded
            .get_or_init(|| codec::decode(&self.raw, self.variant))
    }

    pub fn value(&self) -> &str {
        &self.decoded().value
    }
}
