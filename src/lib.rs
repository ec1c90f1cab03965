//! resrefactor - move hard-coded strings into resource files
//!
//! resrefactor is a CLI tool and library that finds string literals in C#,
//! Visual Basic, XAML, Razor and ASP.NET Web Forms sources and replaces them
//! with references to `.resx` resource entries, shortened against the
//! namespace imports in scope.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Literal extraction engine
//! - `error`: Engine error type
//! - `file_scanner`: Project file discovery
//! - `issues`: Findings reported by the CLI
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file_scanner;
pub mod issues;
pub mod utils;
