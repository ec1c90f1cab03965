//! Turning a selected literal into a resource reference in place.
//!
//! ```text
//! Idle -> SelectionValidated -> ReferenceComputed -> Replaced
//!   \___________________\__________________\_______-> Aborted
//! ```
//!
//! [`ExtractionOrchestrator::preview`] stops at `ReferenceComputed` without
//! touching the document; [`ExtractionOrchestrator::extract`] goes on to
//! apply the edits inside one undo scope.

use serde::Serialize;

use crate::core::{
    document::DocumentHost,
    grammar::GrammarVariant,
    imports::{NamespaceImport, ScanContext, scan_imports},
    literal::HardCodedString,
    project::{ProjectItem, ResourceFile},
    shorten::{ShortenResult, shorten},
    span::LiteralSpan,
    strategy::{ExtractResourceAction, ResourceReferenceRequest, StrategyRegistry},
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionState {
    #[default]
    Idle,
    SelectionValidated,
    ReferenceComputed,
    Replaced,
    Aborted,
}

/// One literal to extract and where its value went.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    /// Document id known to the host.
    pub document: &'a str,
    pub item: ProjectItem<'a>,
    /// Selected byte range; a caret is an empty range.
    pub selection: (usize, usize),
    pub resource_file: &'a ResourceFile,
    /// Key the value was stored under.
    pub resource_name: &'a str,
    pub scan: ScanContext<'a>,
}

/// What an extraction would write.
#[derive(Debug, Clone)]
pub struct Preview {
    pub literal: HardCodedString,
    /// Name of the strategy that produced the reference.
    pub strategy: &'static str,
    /// Resource file with the settings the strategy applies to it.
    pub resource_file: ResourceFile,
    /// Fully qualified reference before shortening.
    pub reference: String,
    pub imports: Vec<NamespaceImport>,
    pub shortened: ShortenResult,
    /// Exact text that replaces the literal span.
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub preview: Preview,
    /// Span the replacement landed on, after any namespace declaration was
    /// inserted ahead of it.
    pub replaced: LiteralSpan,
    /// Line(s) containing the replacement.
    pub updated_lines: String,
}

/// Runs extractions one document at a time, remembering which strategy
/// each document resolved to.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOrchestrator {
    registry: StrategyRegistry,
    state: ExtractionState,
}

impl ExtractionOrchestrator {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            state: ExtractionState::Idle,
        }
    }

    /// State reached by the last preview or extraction.
    pub fn state(&self) -> ExtractionState {
        self.state
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Compute the replacement without editing the document.
    pub fn preview(
        &mut self,
        host: &impl DocumentHost,
        request: &ExtractionRequest<'_>,
    ) -> Result<Preview> {
        self.state = ExtractionState::Idle;
        let preview = self.compute(host, request);
        if preview.is_err() {
            self.state = ExtractionState::Aborted;
        }
        preview
    }

    /// Replace the literal with its resource reference.
    ///
    /// Any failure rolls the document back to where it was.
    pub fn extract(
        &mut self,
        host: &mut impl DocumentHost,
        request: &ExtractionRequest<'_>,
    ) -> Result<ExtractionOutcome> {
        let preview = self.preview(host, request)?;
        let id = request.document;

        if let Err(err) = host.begin_undo(id) {
            self.state = ExtractionState::Aborted;
            return Err(err);
        }
        match apply(host, id, &preview) {
            Ok((replaced, updated_lines)) => {
                self.state = ExtractionState::Replaced;
                tracing::info!(
                    "replaced {} in {} with {}",
                    preview.literal.raw(),
                    id,
                    preview.replacement
                );
                Ok(ExtractionOutcome {
                    preview,
                    replaced,
                    updated_lines,
                })
            }
            Err(err) => {
                host.abort(id);
                self.state = ExtractionState::Aborted;
                Err(err)
            }
        }
    }

    fn compute(&mut self, host: &impl DocumentHost, request: &ExtractionRequest<'_>) -> Result<Preview> {
        let text = host.text(request.document)?;
        let variant = request.item.variant;
        let (sel_start, sel_end) = request.selection;

        let literal = HardCodedString::locate(request.document, variant, &text, sel_start, sel_end)?;
        self.state = ExtractionState::SelectionValidated;

        let action = self
            .registry
            .resolve(request.document, &request.item)
            .ok_or_else(|| Error::UnsupportedFile {
                path: request.item.path.to_path_buf(),
            })?;
        let resource_file = action.adopt(request.resource_file)?;
        let reference = action.resource_reference(&ResourceReferenceRequest {
            resource_file: &resource_file,
            resource_name: request.resource_name,
            item: request.item,
            literal: &literal,
        })?;

        let imports = scan_imports(variant, &text, literal.span().start, &request.scan);
        let shortened = shorten(variant, &reference, &imports, &text, literal.decoded())?;
        let replacement = match (variant, literal.decoded().quote) {
            (GrammarVariant::Xaml, Some(quote)) => format!("{}{}{}", quote, shortened.text, quote),
            (variant, Some(quote))
                if variant.is_razor() && in_markup_attribute(&text, literal.span().start) =>
            {
                format!("{}@{}{}", quote, shortened.text, quote)
            }
            _ => shortened.text.clone(),
        };

        self.state = ExtractionState::ReferenceComputed;
        Ok(Preview {
            strategy: action.name(),
            resource_file,
            literal,
            reference,
            imports,
            shortened,
            replacement,
        })
    }
}

/// Whether `start` sits right after `name=` inside an open markup tag.
fn in_markup_attribute(text: &str, start: usize) -> bool {
    let before = &text[..start];
    let Some(open) = before.rfind('<') else {
        return false;
    };
    let tag = &before[open + 1..];
    if !tag.starts_with(|c: char| c.is_ascii_alphabetic())
        || tag.contains(['>', ';', '{', '}', '(', ')'])
    {
        return false;
    }
    tag.trim_end()
        .strip_suffix('=')
        .map(str::trim_end)
        .and_then(|name| name.chars().last())
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

fn apply(host: &mut impl DocumentHost, id: &str, preview: &Preview) -> Result<(LiteralSpan, String)> {
    let mut span = preview.literal.span();
    if let Some(edit) = &preview.shortened.required_edit {
        host.insert_text(id, edit.offset, &edit.text)?;
        if edit.offset <= span.start {
            span = span.shifted(edit.text.len());
        }
    }
    let updated = host.replace_span(id, span, &preview.replacement)?;
    host.commit(id)?;
    Ok((span, updated))
}
