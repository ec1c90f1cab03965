use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{
    helper::{CommandContext, SourceFile},
    {CommandResult, CommandSummary, ExtractSummary},
};
use crate::{
    core::{
        ExtractionOrchestrator, ExtractionRequest, ExtractionState, Preview, ProjectItem,
        ScanContext, Workspace,
    },
    error::Error,
    issues::{HardcodedStringIssue, SourceContext},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let file = SourceFile::read(&cmd.file)?;
    let selection = file.selection(cmd.start, cmd.end)?;
    let display = ctx.display_path(&cmd.file);

    let mut resource_file = ctx.config.resource_file.clone();
    if let Some(path) = &cmd.resource_file {
        resource_file.path = path.clone();
    }

    let mut workspace = Workspace::new();
    let id = workspace
        .open(&cmd.file)
        .with_context(|| format!("Failed to open {}", cmd.file.display()))?;

    let project_path = ctx.project_path(&cmd.file);
    let path = fs::canonicalize(&cmd.file)?;
    let root = fs::canonicalize(&ctx.root)?;
    let request = ExtractionRequest {
        document: &id,
        item: ProjectItem::new(&project_path, file.variant, &ctx.config.project),
        selection,
        resource_file: &resource_file,
        resource_name: &cmd.name,
        scan: ScanContext {
            path: Some(&path),
            project_root: Some(&root),
            ambient: ctx.config.ambient_imports,
        },
    };

    let mut orchestrator = ExtractionOrchestrator::default();
    let result = if cmd.apply {
        orchestrator
            .extract(&mut workspace, &request)
            .map(|outcome| (outcome.preview, Some(outcome.updated_lines)))
    } else {
        orchestrator
            .preview(&workspace, &request)
            .map(|preview| (preview, None))
    };

    let (preview, updated_lines) = match result {
        Ok(done) => done,
        Err(Error::NotALiteral) => {
            return Ok(CommandResult::new(CommandSummary::NotALiteral(
                SourceContext::at(display, &file.text, selection.0),
            )));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Cannot extract from {}", display));
        }
    };

    Ok(CommandResult::new(CommandSummary::Extract(summarize(
        &display,
        &file.text,
        preview,
        updated_lines,
        orchestrator.state(),
    ))))
}

fn summarize(
    display: &str,
    text: &str,
    preview: Preview,
    updated_lines: Option<String>,
    state: ExtractionState,
) -> ExtractSummary {
    let required_edit = preview
        .shortened
        .required_edit
        .map(|edit| (SourceContext::at(display, text, edit.offset), edit));

    ExtractSummary {
        issue: HardcodedStringIssue::from_literal(display, text, &preview.literal),
        strategy: preview.strategy,
        resource_file: preview.resource_file,
        reference: preview.reference,
        replacement: preview.replacement,
        required_edit,
        updated_lines,
        state,
    }
}
