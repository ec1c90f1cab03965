use std::ops::Range;

use serde::Serialize;

/// Half-open byte range `[start, end)` into a `\n`-normalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct LiteralSpan {
    pub start: usize,
    pub end: usize,
}

impl LiteralSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "span end {end} before start {start}");
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when `[start, end]` lies within this span (both ends inclusive).
    pub fn encloses(&self, start: usize, end: usize) -> bool {
        self.start <= start && self.end >= end
    }

    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &LiteralSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move the span by `delta` bytes, used after an insertion in front of it.
    pub fn shifted(&self, delta: usize) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Slice the span out of `text`, or `None` when out of range.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.range())
    }
}

/// Outcome of resolving a selection against a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A grammar literal encloses the selection.
    Found(LiteralSpan),
    /// No literal encloses the selection, but it is non-empty and is taken as is.
    Selection(LiteralSpan),
    NotFound,
}

impl MatchResult {
    pub fn found(&self) -> bool {
        !matches!(self, MatchResult::NotFound)
    }

    pub fn span(&self) -> Option<LiteralSpan> {
        match self {
            MatchResult::Found(span) | MatchResult::Selection(span) => Some(*span),
            MatchResult::NotFound => None,
        }
    }
}
