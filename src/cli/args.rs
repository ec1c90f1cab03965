//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: List hard-coded string literals in the project
//! - `locate`: Resolve a selection to the literal it belongs to
//! - `find`: Occurrences of a raw literal outside comments
//! - `imports`: Namespace imports in scope at a position
//! - `extract`: Replace a literal with a resource reference
//! - `init`: Initialize the configuration file

use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Locate(cmd)) => cmd.common.verbose,
            Some(Command::Find(cmd)) => cmd.common.verbose,
            Some(Command::Imports(cmd)) => cmd.common.verbose,
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// 1-based `line:col` position in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, col) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <line>:<col>, got \"{s}\""))?;
        let parse = |part: &str| match part.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("\"{part}\" is not a positive number")),
        };
        Ok(Self {
            line: parse(line)?,
            col: parse(col)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print findings as JSON
    #[arg(long)]
    pub json: bool,

    /// Shortest decoded value to report (overrides config file)
    #[arg(long)]
    pub min_length: Option<usize>,
}

#[derive(Debug, Args)]
pub struct LocateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    pub file: PathBuf,

    /// Selection start (or caret)
    pub start: Position,

    /// Selection end, exclusive
    pub end: Option<Position>,
}

#[derive(Debug, Args)]
pub struct FindCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Search every scanned file instead of one
    #[arg(long)]
    pub all: bool,

    /// `<file> <raw>`, or just `<raw>` with --all
    #[arg(num_args = 1..=2, required = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ImportsCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    pub file: PathBuf,

    pub position: Position,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    pub file: PathBuf,

    /// Selection start (or caret)
    pub start: Position,

    /// Selection end, exclusive
    pub end: Option<Position>,

    /// Resource key the value is stored under
    #[arg(long)]
    pub name: String,

    /// Resource file, relative to the project root (overrides config file)
    #[arg(long)]
    pub resource_file: Option<PathBuf>,

    /// Actually rewrite the file (default is preview)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List hard-coded string literals in the project
    Scan(ScanCommand),
    /// Resolve a position or selection to a string literal
    Locate(LocateCommand),
    /// Find occurrences of a raw literal outside comments
    Find(FindCommand),
    /// Show the namespace imports in scope at a position
    Imports(ImportsCommand),
    /// Replace a string literal with a resource reference
    Extract(ExtractCommand),
    /// Initialize a new .resrefactorrc.json configuration file
    Init,
}
