//! Report formatting and printing utilities.
//!
//! Findings are displayed in cargo-style format. Kept apart from the engine so
//! resrefactor can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, FindSummary, ImportsSummary, InitSummary,
    LocateSummary, ScanSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::ExtractionState;
use crate::issues::{HardcodedStringIssue, SourceContext};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, writer),
        CommandSummary::Locate(summary) => print_locate(summary, writer),
        CommandSummary::Find(summary) => print_find(summary, writer),
        CommandSummary::Imports(summary) => print_imports(summary, writer),
        CommandSummary::Extract(summary) => print_extract(summary, writer),
        CommandSummary::NotALiteral(ctx) => {
            let _ = writeln!(
                writer,
                "{} No string literal at {}:{}:{}",
                FAILURE_MARK.red(),
                ctx.file_path(),
                ctx.line(),
                ctx.col()
            );
        }
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

/// One located span, cargo-style: header, `-->` location, source line and
/// an underline `underline` chars wide.
fn print_snippet<W: Write>(
    writer: &mut W,
    header: &str,
    ctx: &SourceContext,
    underline: usize,
    width: usize,
) {
    let _ = writeln!(writer, "{}", header);
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        ctx.file_path(),
        ctx.line(),
        ctx.col()
    );
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        ctx.line().to_string().blue(),
        "|".blue(),
        ctx.source_line,
        width = width
    );

    // Carets start at the column (col is 1-based) and stop at the line end.
    let prefix: String = ctx.source_line.chars().take(ctx.col() - 1).collect();
    let rest: String = ctx
        .source_line
        .chars()
        .skip(ctx.col() - 1)
        .take(underline)
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let carets = "^".repeat(UnicodeWidthStr::width(rest.as_str()).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.yellow(),
        width = width,
        padding = caret_padding
    );
}

fn print_note<W: Write>(writer: &mut W, label: &str, text: &str, width: usize) {
    let _ = writeln!(
        writer,
        "{:>width$} {} {} {}",
        "",
        "=".blue(),
        format!("{}:", label).bold(),
        text,
        width = width
    );
}

fn line_width<'a>(contexts: impl Iterator<Item = &'a SourceContext>) -> usize {
    contexts
        .map(|ctx| ctx.line())
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn literal_header(issue: &HardcodedStringIssue) -> String {
    format!(
        "{}: {}  {}",
        "literal".bold().yellow(),
        issue.raw.lines().next().unwrap_or_default(),
        issue.variant.to_string().dimmed().cyan()
    )
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_scan<W: Write>(summary: &ScanSummary, writer: &mut W) {
    if summary.json {
        match serde_json::to_string_pretty(&summary.issues) {
            Ok(json) => {
                let _ = writeln!(writer, "{}", json);
            }
            Err(err) => tracing::error!("cannot serialize findings: {}", err),
        }
        return;
    }

    let width = line_width(summary.issues.iter().map(|issue| &issue.context));
    for issue in &summary.issues {
        print_snippet(
            writer,
            &literal_header(issue),
            &issue.context,
            issue.underline_len(),
            width,
        );
        let _ = writeln!(writer);
    }

    if summary.issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} {} - no hard-coded strings found",
                summary.files_scanned,
                plural(summary.files_scanned, "file", "files")
            )
            .green()
        );
    } else {
        let mut files: Vec<&str> = summary
            .issues
            .iter()
            .map(|issue| issue.context.file_path())
            .collect();
        files.dedup();
        let _ = writeln!(
            writer,
            "{} {} hard-coded {} in {} {} ({} scanned)",
            FAILURE_MARK.red(),
            summary.issues.len(),
            plural(summary.issues.len(), "string", "strings"),
            files.len(),
            plural(files.len(), "file", "files"),
            summary.files_scanned
        );
    }

    if summary.skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            summary.skipped_count,
            "-v".cyan()
        );
    }
}

fn print_locate<W: Write>(summary: &LocateSummary, writer: &mut W) {
    let issue = &summary.issue;
    let width = line_width(std::iter::once(&issue.context));
    print_snippet(
        writer,
        &literal_header(issue),
        &issue.context,
        issue.underline_len(),
        width,
    );
    print_note(writer, "value", &issue.value, width);
    if summary.from_selection {
        print_note(
            writer,
            "note",
            "no literal encloses the selection, the selected text is used as is",
            width,
        );
    }
}

fn print_find<W: Write>(summary: &FindSummary, writer: &mut W) {
    let width = line_width(summary.occurrences.iter());
    let header = format!("{}: {}", "found".bold().cyan(), summary.raw);
    for ctx in &summary.occurrences {
        print_snippet(writer, &header, ctx, summary.raw.chars().count(), width);
        let _ = writeln!(writer);
    }

    let count = summary.occurrences.len();
    if count == 0 {
        let _ = writeln!(
            writer,
            "{} No occurrences of {} ({} {} searched)",
            FAILURE_MARK.red(),
            summary.raw,
            summary.files_searched,
            plural(summary.files_searched, "file", "files")
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Found {} {} of {}",
                count,
                plural(count, "occurrence", "occurrences"),
                summary.raw
            )
            .green()
        );
    }
}

fn print_imports<W: Write>(summary: &ImportsSummary, writer: &mut W) {
    let ctx = &summary.context;
    if summary.imports.is_empty() {
        let _ = writeln!(
            writer,
            "{} No imports in scope at {}:{}:{}",
            FAILURE_MARK.red(),
            ctx.file_path(),
            ctx.line(),
            ctx.col()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "Imports in scope at {}:{}:{}",
        ctx.file_path(),
        ctx.line(),
        ctx.col()
    );
    let names: Vec<String> = summary
        .imports
        .iter()
        .map(|import| match &import.alias {
            Some(alias) => format!("{} = {}", alias, import.namespace),
            None => import.namespace.clone(),
        })
        .collect();
    let column = names
        .iter()
        .map(|name| UnicodeWidthStr::width(name.as_str()))
        .max()
        .unwrap_or(0);
    for (name, import) in names.iter().zip(&summary.imports) {
        let _ = writeln!(
            writer,
            "  {:<column$}  {}",
            name,
            import.original.dimmed(),
            column = column
        );
    }
}

fn print_extract<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    let issue = &summary.issue;
    let width = line_width(std::iter::once(&issue.context));
    print_snippet(
        writer,
        &literal_header(issue),
        &issue.context,
        issue.underline_len(),
        width,
    );
    print_note(writer, "value", &issue.value, width);
    print_note(writer, "strategy", summary.strategy, width);
    let file = &summary.resource_file;
    let resource = match &file.custom_tool {
        Some(tool) => format!("{} ({})", file.path.display(), tool),
        None => file.path.display().to_string(),
    };
    print_note(writer, "resource file", &resource, width);
    print_note(writer, "reference", &summary.reference, width);
    print_note(writer, "replace with", &summary.replacement, width);
    if let Some((ctx, edit)) = &summary.required_edit {
        let declaration = format!(
            "{} at {}:{}:{}",
            edit.text.trim(),
            ctx.file_path(),
            ctx.line(),
            ctx.col()
        );
        print_note(writer, "declare", &declaration, width);
    }
    let _ = writeln!(writer);

    if summary.state == ExtractionState::Replaced {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Replaced literal in {}", issue.context.file_path()).green()
        );
        if let Some(lines) = &summary.updated_lines {
            for line in lines.lines() {
                let _ = writeln!(writer, "  {} {}", "|".blue(), line);
            }
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} with {}.",
            "Would replace".yellow().bold(),
            issue.raw.lines().next().unwrap_or_default(),
            summary.replacement
        );
        let _ = writeln!(writer, "Run with {} to rewrite the file.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Tests
// ============================================================
