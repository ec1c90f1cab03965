//! Documents the orchestrator edits, behind the [`DocumentHost`] seam.
//!
//! [`Workspace`] is the file-backed implementation: documents are loaded
//! with `\n` line endings, edited in memory, and written back (with their
//! original line endings) when an undo scope commits.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::core::span::LiteralSpan;
use crate::error::{Error, Result};
use crate::utils::normalize_line_endings;

/// Text access and mutation the extraction needs from its environment.
pub trait DocumentHost {
    /// Current, `\n`-normalized text of a document.
    fn text(&self, id: &str) -> Result<String>;

    /// Replace `span` with `text`, returning the edited line(s).
    fn replace_span(&mut self, id: &str, span: LiteralSpan, text: &str) -> Result<String>;

    fn insert_text(&mut self, id: &str, offset: usize, text: &str) -> Result<()>;

    /// Open an undo scope. Edits until [`DocumentHost::commit`] or
    /// [`DocumentHost::abort`] form one unit.
    fn begin_undo(&mut self, id: &str) -> Result<()>;

    fn commit(&mut self, id: &str) -> Result<()>;

    /// Drop every edit made since [`DocumentHost::begin_undo`].
    fn abort(&mut self, id: &str);
}

#[derive(Debug, Clone)]
struct Document {
    text: String,
    path: Option<PathBuf>,
    read_only: bool,
    checkout_allowed: bool,
    crlf: bool,
    snapshot: Option<String>,
}

impl Document {
    fn path_or(&self, id: &str) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from(id))
    }
}

/// In-memory documents keyed by id, optionally backed by files.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: HashMap<String, Document>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document that lives only in memory.
    pub fn insert(&mut self, id: impl Into<String>, text: &str) {
        self.documents.insert(
            id.into(),
            Document {
                text: normalize_line_endings(text),
                path: None,
                read_only: false,
                checkout_allowed: true,
                crlf: text.contains("\r\n"),
                snapshot: None,
            },
        );
    }

    /// Load a file; its id is the path as given.
    pub fn open(&mut self, path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path)?;
        let read_only = fs::metadata(path)?.permissions().readonly();
        let id = path.display().to_string();
        self.documents.insert(
            id.clone(),
            Document {
                text: normalize_line_endings(&raw),
                path: Some(path.to_path_buf()),
                read_only,
                checkout_allowed: true,
                crlf: raw.contains("\r\n"),
                snapshot: None,
            },
        );
        Ok(id)
    }

    pub fn set_read_only(&mut self, id: &str, read_only: bool) -> Result<()> {
        self.document_mut(id)?.read_only = read_only;
        Ok(())
    }

    /// Simulate a source-control checkout being refused.
    pub fn refuse_checkout(&mut self, id: &str) -> Result<()> {
        self.document_mut(id)?.checkout_allowed = false;
        Ok(())
    }

    fn document(&self, id: &str) -> Result<&Document> {
        self.documents.get(id).ok_or_else(|| Error::UnknownDocument {
            id: id.to_string(),
        })
    }

    fn document_mut(&mut self, id: &str) -> Result<&mut Document> {
        self.documents
            .get_mut(id)
            .ok_or_else(|| Error::UnknownDocument { id: id.to_string() })
    }

    /// A document that may be edited: checked out first, then writable.
    fn editable(&mut self, id: &str) -> Result<&mut Document> {
        let document = self.document_mut(id)?;
        if !document.checkout_allowed {
            return Err(Error::FileCheckedOut {
                path: document.path_or(id),
            });
        }
        if document.read_only {
            return Err(Error::FileReadOnly {
                path: document.path_or(id),
            });
        }
        Ok(document)
    }
}

impl DocumentHost for Workspace {
    fn text(&self, id: &str) -> Result<String> {
        Ok(self.document(id)?.text.clone())
    }

    fn replace_span(&mut self, id: &str, span: LiteralSpan, text: &str) -> Result<String> {
        let document = self.editable(id)?;
        if span.slice(&document.text).is_none() {
            return Err(Error::SpanOutOfRange {
                start: span.start,
                end: span.end,
                len: document.text.len(),
            });
        }
        document.text.replace_range(span.range(), text);

        let line_start = document.text[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let edit_end = span.start + text.len();
        let line_end = document.text[edit_end..]
            .find('\n')
            .map_or(document.text.len(), |i| edit_end + i);
        Ok(document.text[line_start..line_end].to_string())
    }

    fn insert_text(&mut self, id: &str, offset: usize, text: &str) -> Result<()> {
        let document = self.editable(id)?;
        if !document.text.is_char_boundary(offset) {
            return Err(Error::SpanOutOfRange {
                start: offset,
                end: offset,
                len: document.text.len(),
            });
        }
        document.text.insert_str(offset, text);
        Ok(())
    }

    fn begin_undo(&mut self, id: &str) -> Result<()> {
        let document = self.document_mut(id)?;
        document.snapshot = Some(document.text.clone());
        Ok(())
    }

    fn commit(&mut self, id: &str) -> Result<()> {
        let document = self.document_mut(id)?;
        document.snapshot = None;
        if let Some(path) = &document.path {
            let contents = if document.crlf {
                document.text.replace('\n', "\r\n")
            } else {
                document.text.clone()
            };
            fs::write(path, contents)?;
            tracing::info!("wrote {}", path.display());
        }
        Ok(())
    }

    fn abort(&mut self, id: &str) {
        if let Some(document) = self.documents.get_mut(id)
            && let Some(snapshot) = document.snapshot.take()
        {
            document.text = snapshot;
        }
    }
}
