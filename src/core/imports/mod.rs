//! Namespace imports in effect at a position of a document.
//!
//! ## Module Structure
//!
//! - `code`: C# `namespace`/`using` and VB `Namespace`/`Imports`
//! - `xaml`: `xmlns` declarations on the root element
//! - `razor`: `@using`/`@Imports` directives plus `_ViewImports.cshtml` and
//!   `web.config` namespaces found on disk
//!
//! Nothing here fails: anything unreadable is logged and treated as "no
//! imports", which leaves references fully qualified.

mod code;
mod razor;
mod xaml;

use std::path::Path;

use serde::Serialize;

use crate::core::grammar::GrammarVariant;

pub use xaml::root_attribute_insertion_offset;

/// One namespace import as declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceImport {
    /// Declaration text the import was read from.
    pub original: String,
    /// Imported namespace (or XML namespace URI for XAML).
    pub namespace: String,
    pub alias: Option<String>,
}

impl NamespaceImport {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            original: namespace.clone(),
            namespace,
            alias: None,
        }
    }

    pub fn aliased(alias: impl Into<String>, namespace: impl Into<String>) -> Self {
        let alias = alias.into();
        let namespace = namespace.into();
        Self {
            original: format!("{} = {}", alias, namespace),
            namespace,
            alias: Some(alias),
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }
}

/// Where the scanned document lives, for imports declared outside it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanContext<'a> {
    /// Path of the document on disk.
    pub path: Option<&'a Path>,
    /// Root of the project; ambient files are looked up from here down.
    pub project_root: Option<&'a Path>,
    /// Read `web.config` and `_ViewImports.cshtml` for Razor documents.
    pub ambient: bool,
}

/// Imports effective at byte `position` of `text`, in declaration order.
pub fn scan_imports(
    variant: GrammarVariant,
    text: &str,
    position: usize,
    context: &ScanContext<'_>,
) -> Vec<NamespaceImport> {
    let position = position.min(text.len());
    match variant {
        GrammarVariant::CSharp => code::csharp_imports(text, position),
        GrammarVariant::VisualBasic => code::vb_imports(text, position),
        GrammarVariant::Xaml => xaml::xmlns_imports(text),
        GrammarVariant::CSharpRazor | GrammarVariant::VbRazor => {
            razor::razor_imports(variant, text, context)
        }
        GrammarVariant::Aspx => Vec::new(),
    }
}
