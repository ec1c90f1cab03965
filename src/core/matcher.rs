//! Selection-to-literal resolution and raw-text occurrence search.

use crate::core::{
    grammar::{LiteralGrammar, TokenKind},
    span::{LiteralSpan, MatchResult},
};

/// Literal queries over one document text for one grammar.
#[derive(Debug, Clone, Copy)]
pub struct LiteralMatcher<'g> {
    grammar: &'g LiteralGrammar,
}

impl<'g> LiteralMatcher<'g> {
    pub fn new(grammar: &'g LiteralGrammar) -> Self {
        Self { grammar }
    }

    /// Resolve `[sel_start, sel_end]` to the first literal that encloses it.
    ///
    /// A non-empty selection that no literal encloses is returned as
    /// [`MatchResult::Selection`]; callers decide whether to accept it.
    pub fn locate_literal(&self, text: &str, sel_start: usize, sel_end: usize) -> MatchResult {
        let (sel_start, sel_end) = (sel_start.min(sel_end), sel_start.max(sel_end));

        let enclosing = self
            .grammar
            .literals(text)
            .take_while(|token| token.span.start <= sel_start)
            .find(|token| token.span.encloses(sel_start, sel_end));
        if let Some(token) = enclosing {
            return MatchResult::Found(token.span);
        }

        if sel_start < sel_end && sel_end <= text.len() {
            return MatchResult::Selection(LiteralSpan::new(sel_start, sel_end));
        }
        MatchResult::NotFound
    }

    /// Every literal in the text, with its kind.
    pub fn literals(&self, text: &str) -> Vec<(TokenKind, LiteralSpan)> {
        self.grammar
            .literals(text)
            .map(|token| (token.kind, token.span))
            .collect()
    }

    /// Occurrences of `raw` (case-sensitive) that do not touch a comment.
    ///
    /// Spans come back in ascending order and never overlap each other.
    pub fn find_all_in_document(&self, text: &str, raw: &str) -> Vec<LiteralSpan> {
        if raw.is_empty() {
            return Vec::new();
        }

        let comments: Vec<LiteralSpan> = self.grammar.comments(text).collect();
        let mut next_comment = 0;
        let mut found = Vec::new();

        for (start, hit) in text.match_indices(raw) {
            let span = LiteralSpan::new(start, start + hit.len());
            // comments ending at or before the hit can never overlap a later one
            while comments
                .get(next_comment)
                .is_some_and(|comment| comment.end <= span.start)
            {
                next_comment += 1;
            }
            let in_comment = comments
                .get(next_comment)
                .is_some_and(|comment| comment.overlaps(&span));
            if !in_comment {
                found.push(span);
            }
        }

        found
    }
}
