use anyhow::Result;

use super::super::args::LocateCommand;
use super::{
    helper::{CommandContext, SourceFile},
    {CommandResult, CommandSummary, LocateSummary},
};
use crate::{
    core::HardCodedString,
    error::Error,
    issues::{HardcodedStringIssue, SourceContext},
};

pub fn locate(cmd: LocateCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let file = SourceFile::read(&cmd.file)?;
    let (start, end) = file.selection(cmd.start, cmd.end)?;
    let display = ctx.display_path(&cmd.file);

    let summary = match HardCodedString::locate(&display, file.variant, &file.text, start, end) {
        Ok(literal) => CommandSummary::Locate(LocateSummary {
            issue: HardcodedStringIssue::from_literal(&display, &file.text, &literal),
            from_selection: literal.from_selection(),
        }),
        Err(Error::NotALiteral) => {
            CommandSummary::NotALiteral(SourceContext::at(display, &file.text, start))
        }
        Err(err) => return Err(err.into()),
    };
    Ok(CommandResult::new(summary))
}
