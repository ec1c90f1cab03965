use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, anyhow};

use super::super::args::{CommonArgs, Position};
use crate::{
    config::{Config, load_config},
    core::GrammarVariant,
    file_scanner::{ScanResult, scan_files},
    utils::{LineIndex, normalize_line_endings},
};

/// Configuration and project root shared by every command.
pub struct CommandContext {
    pub config: Config,
    /// Directory the config was found in (or the source root); project-relative
    /// paths resolve against it.
    pub root: PathBuf,
    /// Directory files are scanned from.
    pub source_root: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        // Priority: CLI --source-root arg > current directory
        let start = common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let loaded = load_config(&start)?;

        if common.verbose && !loaded.from_file {
            tracing::info!("no config file found, using defaults");
        }

        let source_root = match &common.source_root {
            Some(root) => root.clone(),
            None => loaded.root.join(&loaded.config.source_root),
        };

        Ok(Self {
            config: loaded.config,
            root: loaded.root,
            source_root,
            verbose: common.verbose,
        })
    }

    pub fn scan(&self) -> ScanResult {
        scan_files(
            &self.source_root,
            &self.config.includes,
            &self.config.ignores,
            self.config.ignore_generated,
        )
    }

    /// Path shown to the user: relative to the source root when inside it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Path relative to the project root, as strategies see it.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path)
            .ok()
            .zip(fs::canonicalize(&self.root).ok())
            .and_then(|(file, root)| file.strip_prefix(&root).ok().map(Path::to_path_buf))
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// A source file read for a single-file command.
pub struct SourceFile {
    pub path: PathBuf,
    pub variant: GrammarVariant,
    /// `\n`-normalized contents.
    pub text: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let variant = GrammarVariant::from_path(path)
            .ok_or_else(|| anyhow!("unsupported file type: {}", path.display()))?;
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            variant,
            text: normalize_line_endings(&text),
        })
    }

    /// Byte offset of a 1-based position.
    pub fn offset(&self, position: Position) -> Result<usize> {
        LineIndex::new(&self.text)
            .offset(position.line, position.col)
            .ok_or_else(|| anyhow!("position {} is outside {}", position, self.path.display()))
    }

    /// Byte range of a caret or selection, start first.
    pub fn selection(&self, start: Position, end: Option<Position>) -> Result<(usize, usize)> {
        let start = self.offset(start)?;
        let end = match end {
            Some(end) => self.offset(end)?,
            None => start,
        };
        Ok((start.min(end), start.max(end)))
    }
}
