use std::fs;

use anyhow::Result;

use super::super::args::ImportsCommand;
use super::{
    helper::{CommandContext, SourceFile},
    {CommandResult, CommandSummary, ImportsSummary},
};
use crate::{
    core::{ScanContext, scan_imports},
    issues::SourceContext,
};

pub fn imports(cmd: ImportsCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let file = SourceFile::read(&cmd.file)?;
    let position = file.offset(cmd.position)?;

    let path = fs::canonicalize(&cmd.file)?;
    let root = fs::canonicalize(&ctx.root)?;
    let scan = ScanContext {
        path: Some(&path),
        project_root: Some(&root),
        ambient: ctx.config.ambient_imports,
    };
    let imports = scan_imports(file.variant, &file.text, position, &scan);

    Ok(CommandResult::new(CommandSummary::Imports(ImportsSummary {
        context: SourceContext::at(ctx.display_path(&cmd.file), &file.text, position),
        imports,
    })))
}
