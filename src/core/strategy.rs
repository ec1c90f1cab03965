//! Resource reference strategies and the registry that picks one per document.
//!
//! A strategy knows, for one language and project flavour, which `.resx`
//! files are usable, how those files should be configured, and how the
//! generated resource class is spelled from code. The registry holds a fixed,
//! explicitly populated list and selects the highest-priority strategy that
//! supports a document.

use std::collections::HashMap;

use enum_dispatch::enum_dispatch;

use crate::core::{
    grammar::GrammarVariant,
    literal::HardCodedString,
    project::{
        GLOBAL_RESOURCE_PROXY_GENERATOR, GLOBAL_RESOURCES_DIR, ItemType, Project, ProjectItem,
        ProjectKind, ResourceFile, ResourceFileSettings, VB_MY_RESOURCES,
    },
};
use crate::error::{Error, Result};

const DEFAULT_PRIORITY: u32 = 10;
const WEB_PRIORITY: u32 = 50;
const GLOBAL_RESOURCES_PREFIX: &str = "Resources";

/// Cached strategy choices are dropped once the cache grows past this.
const CACHE_LIMIT: usize = 30;

/// Everything a strategy needs to spell a reference.
#[derive(Debug, Clone, Copy)]
pub struct ResourceReferenceRequest<'a> {
    pub resource_file: &'a ResourceFile,
    pub resource_name: &'a str,
    pub item: ProjectItem<'a>,
    pub literal: &'a HardCodedString,
}

impl ResourceReferenceRequest<'_> {
    /// Resource name as it appears in generated code.
    fn member(&self) -> Result<String> {
        if self.resource_name.trim().is_empty() {
            return Err(Error::InvalidResourceName {
                name: self.resource_name.to_string(),
            });
        }
        Ok(self.resource_name.replace(' ', "_"))
    }

    fn project(&self) -> &Project {
        self.item.project
    }
}

// ============================================================
// Strategy Trait
// ============================================================

#[enum_dispatch]
pub trait ExtractResourceAction {
    fn name(&self) -> &'static str;

    /// Higher wins when several strategies support an item.
    fn priority(&self) -> u32 {
        DEFAULT_PRIORITY
    }

    /// Folder new resource files go to, if the strategy has a preference.
    fn default_resource_path(&self) -> Option<&'static str> {
        None
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool;

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        is_embedded_resx(file)
    }

    /// Properties to apply to a file the strategy writes into; `None` leaves
    /// the file untouched.
    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        Some(ResourceFileSettings::code_generator())
    }

    /// Fully qualified reference to the resource, before shortening.
    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String>;

    /// The resource file as this strategy will write into it.
    ///
    /// A file without a custom tool is taken as new and gets the strategy's
    /// settings; an explicit custom tool namespace is kept.
    fn adopt(&self, file: &ResourceFile) -> Result<ResourceFile> {
        let mut adopted = file.clone();
        if adopted.custom_tool.is_none()
            && let Some(settings) = self.resource_file_settings(file)
        {
            adopted.custom_tool = Some(settings.custom_tool);
            adopted.item_type = settings.item_type;
            if adopted.custom_tool_namespace.is_none() {
                adopted.custom_tool_namespace = settings.custom_tool_namespace;
            }
        }

        if !self.is_valid_resource_file(&adopted) {
            return Err(Error::InvalidResourceFile {
                path: file.path.clone(),
                strategy: self.name(),
                hint: self
                    .default_resource_path()
                    .map(|dir| format!(" (expected a .resx file in {}/)", dir))
                    .unwrap_or_default(),
            });
        }
        Ok(adopted)
    }
}

fn is_embedded_resx(file: &ResourceFile) -> bool {
    file.is_resx() && file.item_type == ItemType::EmbeddedResource
}

/// Web application global resources: content files behind the proxy
/// generator in `App_GlobalResources`.
fn is_content_global_resx(file: &ResourceFile) -> bool {
    file.is_global_resource()
        && file.item_type == ItemType::Content
        && file.uses_custom_tool(GLOBAL_RESOURCE_PROXY_GENERATOR)
}

fn web_application_settings(file: &ResourceFile, fallback: ResourceFileSettings) -> ResourceFileSettings {
    if file.directory() == GLOBAL_RESOURCES_DIR {
        ResourceFileSettings::global_resource()
    } else {
        fallback
    }
}

/// `custom tool namespace`, else the file's own namespace.
fn code_namespace(file: &ResourceFile, project: &Project) -> Option<String> {
    file.custom_tool_namespace
        .clone()
        .filter(|ns| !ns.is_empty())
        .or_else(|| file.namespace(project))
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

// ============================================================
// C#
// ============================================================

fn csharp_reference(request: &ResourceReferenceRequest<'_>, namespace: Option<&str>) -> Result<String> {
    let member = request.member()?;
    let stem = request.resource_file.stem();
    Ok(join(&[namespace.unwrap_or_default(), stem.as_str(), member.as_str()]))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericCSharp;

impl ExtractResourceAction for GenericCSharp {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        match item.variant {
            GrammarVariant::CSharp => item.project.kind == ProjectKind::CSharp,
            GrammarVariant::CSharpRazor => true,
            _ => false,
        }
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        let namespace = code_namespace(request.resource_file, request.project());
        csharp_reference(request, namespace.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteCSharp;

impl ExtractResourceAction for WebsiteCSharp {
    fn name(&self) -> &'static str {
        "csharp-website"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::CSharp && item.project.kind == ProjectKind::WebSite
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        file.is_global_resource()
    }

    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        None
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        csharp_reference(request, Some(GLOBAL_RESOURCES_PREFIX))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebApplicationCSharp;

impl ExtractResourceAction for WebApplicationCSharp {
    fn name(&self) -> &'static str {
        "csharp-web-application"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::CSharp
            && item.project.kind == ProjectKind::CSharp
            && item.project.is_web_application()
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        is_embedded_resx(file) || is_content_global_resx(file)
    }

    fn resource_file_settings(&self, file: &ResourceFile) -> Option<ResourceFileSettings> {
        Some(web_application_settings(file, ResourceFileSettings::code_generator()))
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        if request.resource_file.uses_custom_tool(GLOBAL_RESOURCE_PROXY_GENERATOR) {
            return csharp_reference(request, Some(GLOBAL_RESOURCES_PREFIX));
        }
        GenericCSharp.resource_reference(request)
    }
}

// ============================================================
// VB
// ============================================================

/// VB drops the file name for `My Project/Resources.resx`.
fn vb_reference(request: &ResourceReferenceRequest<'_>, namespace: Option<&str>) -> Result<String> {
    let member = request.member()?;
    let stem = if request.resource_file.is_default_resx() {
        String::new()
    } else {
        request.resource_file.stem()
    };
    Ok(join(&[namespace.unwrap_or_default(), stem.as_str(), member.as_str()]))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericVb;

impl ExtractResourceAction for GenericVb {
    fn name(&self) -> &'static str {
        "vb"
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        match item.variant {
            GrammarVariant::VisualBasic => item.project.kind == ProjectKind::VisualBasic,
            GrammarVariant::VbRazor => true,
            _ => false,
        }
    }

    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        Some(ResourceFileSettings::code_generator().in_namespace(VB_MY_RESOURCES))
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        let namespace = code_namespace(request.resource_file, request.project());
        vb_reference(request, namespace.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteVb;

impl ExtractResourceAction for WebsiteVb {
    fn name(&self) -> &'static str {
        "vb-website"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::VisualBasic && item.project.kind == ProjectKind::WebSite
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        file.is_global_resource()
    }

    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        None
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        vb_reference(request, Some(GLOBAL_RESOURCES_PREFIX))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebApplicationVb;

impl ExtractResourceAction for WebApplicationVb {
    fn name(&self) -> &'static str {
        "vb-web-application"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::VisualBasic
            && item.project.kind == ProjectKind::VisualBasic
            && item.project.is_web_application()
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        is_embedded_resx(file) || is_content_global_resx(file)
    }

    fn resource_file_settings(&self, file: &ResourceFile) -> Option<ResourceFileSettings> {
        let fallback = ResourceFileSettings::code_generator().in_namespace(VB_MY_RESOURCES);
        Some(web_application_settings(file, fallback))
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        if request.resource_file.uses_custom_tool(GLOBAL_RESOURCE_PROXY_GENERATOR) {
            return vb_reference(request, Some(GLOBAL_RESOURCES_PREFIX));
        }
        GenericVb.resource_reference(request)
    }
}

// ============================================================
// XAML
// ============================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericXaml;

impl ExtractResourceAction for GenericXaml {
    fn name(&self) -> &'static str {
        "xaml"
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::Xaml
    }

    /// `clr.namespace:Class.Member`, with the VB root namespace in front for
    /// VB projects.
    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        let member = request.member()?;
        let file = request.resource_file;
        let project = request.project();

        let root = match project.kind {
            ProjectKind::VisualBasic => project
                .root_namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .map(|ns| format!("{}.", ns))
                .unwrap_or_default(),
            _ => String::new(),
        };
        let namespace = code_namespace(file, project)
            .map(|ns| format!("{}:", ns))
            .unwrap_or_default();

        Ok(format!("{}{}{}.{}", root, namespace, file.stem(), member))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VbXaml;

impl ExtractResourceAction for VbXaml {
    fn name(&self) -> &'static str {
        "xaml-vb"
    }

    fn priority(&self) -> u32 {
        DEFAULT_PRIORITY + 1
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.variant == GrammarVariant::Xaml && item.project.kind == ProjectKind::VisualBasic
    }

    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        Some(ResourceFileSettings::code_generator().in_namespace(VB_MY_RESOURCES))
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        GenericXaml.resource_reference(request)
    }
}

// ============================================================
// ASP.NET Web Forms
// ============================================================

/// `<%$ Resources:File, Name %>`, quoted for attribute values and wrapped in
/// an encoding `asp:Literal` for inner text.
fn aspx_reference(request: &ResourceReferenceRequest<'_>) -> Result<String> {
    let member = request.member()?;
    let expression = format!("<%$ Resources:{}, {} %>", request.resource_file.stem(), member);
    Ok(match request.literal.decoded().quote {
        Some(quote) => format!("{}{}{}", quote, expression, quote),
        None => format!(
            "<asp:Literal runat=\"server\" Text=\"{}\" Mode=\"Encode\"/>",
            expression
        ),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAspx;

impl ExtractResourceAction for GenericAspx {
    fn name(&self) -> &'static str {
        "aspx"
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.is_web_form()
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        aspx_reference(request)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteAspx;

impl ExtractResourceAction for WebsiteAspx {
    fn name(&self) -> &'static str {
        "aspx-website"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.is_web_form() && item.project.kind == ProjectKind::WebSite
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        file.is_global_resource()
    }

    fn resource_file_settings(&self, _file: &ResourceFile) -> Option<ResourceFileSettings> {
        None
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        aspx_reference(request)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebApplicationAspx;

impl ExtractResourceAction for WebApplicationAspx {
    fn name(&self) -> &'static str {
        "aspx-web-application"
    }

    fn priority(&self) -> u32 {
        WEB_PRIORITY
    }

    fn default_resource_path(&self) -> Option<&'static str> {
        Some(GLOBAL_RESOURCES_DIR)
    }

    fn supports(&self, item: &ProjectItem<'_>) -> bool {
        item.is_web_form() && item.project.is_web_application()
    }

    fn is_valid_resource_file(&self, file: &ResourceFile) -> bool {
        is_embedded_resx(file) || is_content_global_resx(file)
    }

    fn resource_file_settings(&self, file: &ResourceFile) -> Option<ResourceFileSettings> {
        Some(web_application_settings(file, ResourceFileSettings::code_generator()))
    }

    fn resource_reference(&self, request: &ResourceReferenceRequest<'_>) -> Result<String> {
        aspx_reference(request)
    }
}

// ============================================================
// Registry
// ============================================================

#[enum_dispatch(ExtractResourceAction)]
#[derive(Debug, Clone, Copy)]
pub enum ResourceAction {
    GenericCSharp(GenericCSharp),
    WebsiteCSharp(WebsiteCSharp),
    WebApplicationCSharp(WebApplicationCSharp),
    GenericVb(GenericVb),
    WebsiteVb(WebsiteVb),
    WebApplicationVb(WebApplicationVb),
    GenericXaml(GenericXaml),
    VbXaml(VbXaml),
    GenericAspx(GenericAspx),
    WebsiteAspx(WebsiteAspx),
    WebApplicationAspx(WebApplicationAspx),
}

/// Ordered strategy list with a per-document choice cache.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    actions: Vec<ResourceAction>,
    cache: HashMap<String, usize>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new(vec![
            GenericCSharp.into(),
            WebsiteCSharp.into(),
            WebApplicationCSharp.into(),
            GenericVb.into(),
            WebsiteVb.into(),
            WebApplicationVb.into(),
            GenericXaml.into(),
            VbXaml.into(),
            GenericAspx.into(),
            WebsiteAspx.into(),
            WebApplicationAspx.into(),
        ])
    }
}

impl StrategyRegistry {
    pub fn new(actions: Vec<ResourceAction>) -> Self {
        Self {
            actions,
            cache: HashMap::new(),
        }
    }

    pub fn actions(&self) -> &[ResourceAction] {
        &self.actions
    }

    /// Highest-priority strategy supporting `item`; the earliest registered
    /// wins ties. Choices are remembered per document id.
    pub fn resolve(&mut self, document: &str, item: &ProjectItem<'_>) -> Option<ResourceAction> {
        if let Some(&index) = self.cache.get(document) {
            tracing::debug!("strategy for {} served from cache", document);
            return self.actions.get(index).copied();
        }

        let mut chosen: Option<usize> = None;
        for (index, action) in self.actions.iter().enumerate() {
            if !action.supports(item) {
                continue;
            }
            if chosen.is_none_or(|best| action.priority() > self.actions[best].priority()) {
                chosen = Some(index);
            }
        }

        let index = chosen?;
        if self.cache.len() > CACHE_LIMIT {
            self.cache.clear();
        }
        self.cache.insert(document.to_string(), index);
        tracing::debug!(
            "resolved strategy {} for {}",
            self.actions[index].name(),
            document
        );
        Some(self.actions[index])
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
