//! Findings reported by the CLI.
//!
//! Each finding is self-contained: the reporter prints it without going back
//! to the document, and `scan --json` serializes it as is.

use serde::Serialize;

use crate::core::{GrammarVariant, HardCodedString, LiteralSpan};
use crate::utils::LineIndex;

/// 1-based location in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Location plus the line it sits on, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    #[serde(flatten)]
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    /// Context of byte `offset` in `text`.
    pub fn at(file_path: impl Into<String>, text: &str, offset: usize) -> Self {
        let index = LineIndex::new(text);
        let (line, col) = index.position(offset);
        Self {
            location: SourceLocation::new(file_path, line, col),
            source_line: index.line(line).unwrap_or_default().to_string(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// A string literal found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardcodedStringIssue {
    #[serde(flatten)]
    pub context: SourceContext,
    pub variant: GrammarVariant,
    /// Literal as written, delimiters included.
    pub raw: String,
    /// Decoded value.
    pub value: String,
    #[serde(skip)]
    pub span: LiteralSpan,
}

impl HardcodedStringIssue {
    pub fn from_literal(file_path: &str, text: &str, literal: &HardCodedString) -> Self {
        Self {
            context: SourceContext::at(file_path, text, literal.span().start),
            variant: literal.variant(),
            raw: literal.raw().to_string(),
            value: literal.value().to_string(),
            span: literal.span(),
        }
    }

    /// Display width of the part of the literal on its first line.
    pub fn underline_len(&self) -> usize {
        self.raw.lines().next().map_or(1, |first| first.chars().count().max(1))
    }
}

impl Ord for HardcodedStringIssue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.context
            .location
            .cmp(&other.context.location)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for HardcodedStringIssue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_issue_from_literal() {
        let text = "class A {\n    string s = \"Hé llo\";\n}\n";
        let start = text.find('"').unwrap();
        let literal =
            HardCodedString::locate("A.cs", GrammarVariant::CSharp, text, start + 2, start + 2)
                .unwrap();

        let issue = HardcodedStringIssue::from_literal("A.cs", text, &literal);
        assert_eq!(issue.context.location, SourceLocation::new("A.cs", 2, 16));
        assert_eq!(issue.context.source_line, "    string s = \"Hé llo\";");
        assert_eq!(issue.value, "Hé llo");
        assert_eq!(issue.underline_len(), 8);
    }

    #[test]
    fn test_issue_json_shape() {
        let text = "Dim s = \"Hi\"\n";
        let literal =
            HardCodedString::locate("M.vb", GrammarVariant::VisualBasic, text, 9, 9).unwrap();
        let issue = HardcodedStringIssue::from_literal("M.vb", text, &literal);

        insta::assert_snapshot!(serde_json::to_string(&issue).unwrap(), @r#"{"filePath":"M.vb","line":1,"col":9,"sourceLine":"Dim s = \"Hi\"","variant":"visualbasic","raw":"\"Hi\"","value":"Hi"}"#);
    }

    #[test]
    fn test_issues_sort_by_location() {
        let text = "a = \"x\"\nb = \"y\"\n";
        let mut issues: Vec<HardcodedStringIssue> = [12usize, 4]
            .iter()
            .map(|&offset| {
                let literal =
                    HardCodedString::locate("a.vb", GrammarVariant::VisualBasic, text, offset, offset)
                        .unwrap();
                HardcodedStringIssue::from_literal("a.vb", text, &literal)
            })
            .collect();
        issues.sort();
        assert_eq!(issues[0].context.line(), 1);
        assert_eq!(issues[1].context.line(), 2);
    }
}
