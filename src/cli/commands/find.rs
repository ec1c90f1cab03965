use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;

use super::super::args::FindCommand;
use super::{
    helper::{CommandContext, SourceFile},
    {CommandResult, CommandSummary, FindSummary},
};
use crate::{core::LiteralMatcher, issues::SourceContext};

pub fn find(cmd: FindCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;

    let (files, raw): (Vec<PathBuf>, &str) = match (cmd.all, cmd.args.as_slice()) {
        (true, [raw]) => (ctx.scan().files.into_iter().collect(), raw.as_str()),
        (false, [file, raw]) => (vec![PathBuf::from(file)], raw.as_str()),
        (true, _) => bail!("find --all takes only the raw literal"),
        (false, _) => bail!("find takes <file> <raw>, or --all <raw>"),
    };

    let per_file: Vec<Result<Vec<SourceContext>>> = files
        .par_iter()
        .map(|path| find_in_file(&ctx, path, raw))
        .collect();

    let mut occurrences = Vec::new();
    for result in per_file {
        match result {
            Ok(found) => occurrences.extend(found),
            // A single named file that cannot be read is an error; in a
            // project-wide search it is only skipped.
            Err(err) if cmd.all => tracing::warn!("{:#}", err),
            Err(err) => return Err(err),
        }
    }
    occurrences.sort_by(|a, b| a.location.cmp(&b.location));

    Ok(CommandResult::new(CommandSummary::Find(FindSummary {
        raw: raw.to_string(),
        occurrences,
        files_searched: files.len(),
    })))
}

fn find_in_file(ctx: &CommandContext, path: &Path, raw: &str) -> Result<Vec<SourceContext>> {
    let file = SourceFile::read(path)?;
    let display = ctx.display_path(path);
    let matcher = LiteralMatcher::new(file.variant.grammar());
    Ok(matcher
        .find_all_in_document(&file.text, raw)
        .into_iter()
        .map(|span| SourceContext::at(display.as_str(), &file.text, span.start))
        .collect())
}
