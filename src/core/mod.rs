//! Literal extraction engine.
//!
//! Locates hard-coded strings in C#, VB, XAML, Razor and ASP.NET Web Forms
//! sources and rewrites them as references to resource entries.
//!
//! ## Module Structure
//!
//! - `grammar`: per-language lexer regex and token classification
//! - `matcher`: selection-to-literal resolution and raw-text search
//! - `codec`: raw literal text to decoded value (and back for C#/VB)
//! - `literal`: `HardCodedString`, a located literal with a memoized value
//! - `imports`: namespace imports in scope at a position
//! - `shorten`: shortest reference expression given those imports
//! - `project`: project and resource file descriptions
//! - `strategy`: per-language reference strategies and their registry
//! - `document`: `DocumentHost` seam and the file-backed `Workspace`
//! - `extract`: the orchestrator tying it together
//!
//! ## Extraction Flow
//!
//! 1. **Locate** (`matcher::LiteralMatcher`): selection to literal span
//! 2. **Decode** (`codec::decode`): value and quoting context
//! 3. **Reference** (`strategy::StrategyRegistry`): fully qualified reference
//! 4. **Shorten** (`imports::scan_imports`, `shorten::shorten`): minimal form,
//!    plus an `xmlns` declaration for XAML when needed
//! 5. **Replace** (`document::DocumentHost`): edits inside one undo scope

pub mod codec;
pub mod document;
pub mod extract;
pub mod grammar;
pub mod imports;
pub mod literal;
pub mod matcher;
pub mod project;
pub mod shorten;
pub mod span;
pub mod strategy;

pub use codec::{Decoded, decode, encode_simple};
pub use document::{DocumentHost, Workspace};
pub use extract::{ExtractionOrchestrator, ExtractionOutcome, ExtractionRequest, ExtractionState, Preview};
pub use grammar::{GrammarVariant, LiteralGrammar, TokenKind};
pub use imports::{NamespaceImport, ScanContext, scan_imports};
pub use literal::HardCodedString;
pub use matcher::LiteralMatcher;
pub use project::{ItemType, Project, ProjectItem, ProjectKind, ResourceFile};
pub use shorten::{ShortenResult, TextEdit, shorten};
pub use span::{LiteralSpan, MatchResult};
pub use strategy::{ExtractResourceAction, ResourceAction, StrategyRegistry};
