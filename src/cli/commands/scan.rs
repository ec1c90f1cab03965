use std::path::Path;

use anyhow::{Ok, Result};
use rayon::prelude::*;

use super::super::args::ScanCommand;
use super::{
    helper::{CommandContext, SourceFile},
    {CommandResult, CommandSummary, ScanSummary},
};
use crate::{
    core::{HardCodedString, LiteralMatcher},
    issues::HardcodedStringIssue,
    utils::contains_alphabetic,
};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let min_length = cmd.min_length.unwrap_or(ctx.config.min_length);
    let scanned = ctx.scan();

    let files: Vec<&Path> = scanned.files.iter().map(|path| path.as_path()).collect();
    let results: Vec<Option<Vec<HardcodedStringIssue>>> = files
        .par_iter()
        .map(|path| {
            SourceFile::read(path)
                .map(|file| scan_file(&ctx.display_path(path), &file, min_length))
                .map_err(|err| tracing::warn!("{:#}", err))
                .ok()
        })
        .collect();

    let unreadable = results.iter().filter(|result| result.is_none()).count();
    let mut issues: Vec<HardcodedStringIssue> = results.into_iter().flatten().flatten().collect();
    issues.sort();

    Ok(CommandResult::new(CommandSummary::Scan(ScanSummary {
        issues,
        files_scanned: files.len() - unreadable,
        skipped_count: scanned.skipped_count + unreadable,
        json: cmd.json,
    })))
}

/// Literals of one file worth reporting: at least `min_length` chars and at
/// least one letter.
pub fn scan_file(display_path: &str, file: &SourceFile, min_length: usize) -> Vec<HardcodedStringIssue> {
    let matcher = LiteralMatcher::new(file.variant.grammar());
    matcher
        .literals(&file.text)
        .into_iter()
        .filter_map(|(_, span)| {
            HardCodedString::new(display_path, file.variant, &file.text, span).ok()
        })
        .filter(|literal| {
            let value = literal.value();
            value.chars().count() >= min_length && contains_alphabetic(value)
        })
        .map(|literal| HardcodedStringIssue::from_literal(display_path, &file.text, &literal))
        .collect()
}
