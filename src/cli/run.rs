//! Dispatches parsed arguments to the command handlers.
//!
//! # Returns
//! - `Ok(CommandResult)` with what the command found or changed
//! - `Err` if the command fails (e.g., config invalid, file unreadable)

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, extract::extract, find::find, imports::imports, init::init, locate::locate,
        scan::scan,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Locate(cmd)) => locate(cmd),
        Some(Command::Find(cmd)) => find(cmd),
        Some(Command::Imports(cmd)) => imports(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
