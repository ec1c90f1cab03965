use crate::{
    core::{ExtractionState, NamespaceImport, ResourceFile, TextEdit},
    issues::{HardcodedStringIssue, SourceContext},
};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Locate(LocateSummary),
    Find(FindSummary),
    Imports(ImportsSummary),
    Extract(ExtractSummary),
    /// Position given to `locate` or `extract` is not inside a literal.
    NotALiteral(SourceContext),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub issues: Vec<HardcodedStringIssue>,
    pub files_scanned: usize,
    /// Files that could not be walked or read.
    pub skipped_count: usize,
    pub json: bool,
}

#[derive(Debug)]
pub struct LocateSummary {
    pub issue: HardcodedStringIssue,
    /// True when no literal matched and the raw selection was taken.
    pub from_selection: bool,
}

#[derive(Debug)]
pub struct FindSummary {
    pub raw: String,
    pub occurrences: Vec<SourceContext>,
    pub files_searched: usize,
}

#[derive(Debug)]
pub struct ImportsSummary {
    pub context: SourceContext,
    pub imports: Vec<NamespaceImport>,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub issue: HardcodedStringIssue,
    pub strategy: &'static str,
    pub resource_file: ResourceFile,
    pub reference: String,
    pub replacement: String,
    /// Namespace declaration inserted ahead of the literal, with its location.
    pub required_edit: Option<(SourceContext, TextEdit)>,
    /// Line(s) after the replacement, when applied.
    pub updated_lines: Option<String>,
    /// `Replaced` once applied, `ReferenceComputed` for a preview.
    pub state: ExtractionState,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running resrefactor commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self { summary }
    }

    pub fn exit_status(&self) -> ExitStatus {
        let found = match &self.summary {
            CommandSummary::Scan(summary) => !summary.issues.is_empty(),
            CommandSummary::Find(summary) => !summary.occurrences.is_empty(),
            CommandSummary::Imports(summary) => !summary.imports.is_empty(),
            CommandSummary::Locate(_) | CommandSummary::Extract(_) => true,
            CommandSummary::NotALiteral(_) => false,
            CommandSummary::Init(summary) => summary.created,
        };
        if found {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}
