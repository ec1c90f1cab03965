//! Crate-level error type for literal extraction.
//!
//! Absent optional data (no imports, no reachable web.config) is never an
//! error; those paths return empty results instead.

use std::path::PathBuf;

/// Crate result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while locating, shortening or replacing a literal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selection does not resolve to a literal and is empty.
    #[error("selection is not a string literal")]
    NotALiteral,

    /// No reference strategy accepts the file and project combination.
    #[error("no resource strategy supports {}", path.display())]
    UnsupportedFile {
        /// Project-relative path of the rejected item.
        path: PathBuf,
    },

    /// The host refused to check the file out for editing.
    #[error("file could not be checked out: {}", path.display())]
    FileCheckedOut {
        /// File that failed checkout.
        path: PathBuf,
    },

    /// The document is read-only.
    #[error("file is read-only: {}", path.display())]
    FileReadOnly {
        /// File that is read-only.
        path: PathBuf,
    },

    /// XAML document without a root element to carry a namespace declaration.
    #[error("malformed markup: {reason}")]
    MalformedMarkup {
        /// What was missing or unreadable.
        reason: String,
    },

    /// A literal grammar pattern could not be compiled.
    #[error("invalid grammar pattern for {variant}: {reason}")]
    InvalidGrammar {
        /// Grammar variant the pattern was meant for.
        variant: String,
        /// Compiler message or missing group name.
        reason: String,
    },

    /// The strategy cannot reference entries of this resource file.
    #[error("{strategy} cannot use resource file {}{hint}", path.display())]
    InvalidResourceFile {
        /// Project-relative path of the resource file.
        path: PathBuf,
        /// Strategy that rejected it.
        strategy: &'static str,
        /// Where the strategy expects resource files, if anywhere specific.
        hint: String,
    },

    /// Resource entry name is empty.
    #[error("invalid resource name: `{name}`")]
    InvalidResourceName {
        /// The rejected name.
        name: String,
    },

    /// The host does not know the document id.
    #[error("unknown document: {id}")]
    UnknownDocument {
        /// Requested document id.
        id: String,
    },

    /// Offsets outside the document or off a char boundary.
    #[error("span {start}..{end} is outside the document ({len} bytes)")]
    SpanOutOfRange {
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
        /// Document length.
        len: usize,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
