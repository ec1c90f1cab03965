//! Plain project data the strategies work from.
//!
//! Nothing here is read from project files: callers describe the project
//! (usually through `.resrefactorrc.json`) and the resource file to use.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::grammar::GrammarVariant;

/// Custom tool that generates a strongly typed class for a `.resx` file.
pub const RESX_CODE_GENERATOR: &str = "ResXFileCodeGenerator";
/// Custom tool web applications use for `App_GlobalResources`.
pub const GLOBAL_RESOURCE_PROXY_GENERATOR: &str = "GlobalResourceProxyGenerator";
/// Folder holding a web project's global resources.
pub const GLOBAL_RESOURCES_DIR: &str = "App_GlobalResources";
/// Extender name marking a web application project.
pub const WEB_APPLICATION_EXTENDER: &str = "WebApplication";
/// Namespace VB generates `My Project` resources into.
pub const VB_MY_RESOURCES: &str = "My.Resources";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKind {
    #[default]
    #[serde(rename = "csharp")]
    CSharp,
    VisualBasic,
    WebSite,
}

/// The project a document belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub kind: ProjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,
    /// VB root namespace, prepended to XAML references in VB projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_namespace: Option<String>,
    #[serde(default)]
    pub extenders: Vec<String>,
}

impl Project {
    pub fn has_extender(&self, name: &str) -> bool {
        self.extenders.iter().any(|extender| extender == name)
    }

    pub fn is_web_application(&self) -> bool {
        self.has_extender(WEB_APPLICATION_EXTENDER)
    }
}

/// A source file inside a project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectItem<'a> {
    /// Path relative to the project root.
    pub path: &'a Path,
    pub variant: GrammarVariant,
    pub project: &'a Project,
}

impl<'a> ProjectItem<'a> {
    pub fn new(path: &'a Path, variant: GrammarVariant, project: &'a Project) -> Self {
        Self {
            path,
            variant,
            project,
        }
    }

    /// `.aspx`, `.ascx` or `.master`.
    pub fn is_web_form(&self) -> bool {
        self.variant == GrammarVariant::Aspx
    }
}

/// Build action of a `.resx` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    #[default]
    EmbeddedResource,
    Content,
}

/// Properties of the `.resx` file a literal is extracted into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    /// Path relative to the project root.
    #[serde(default)]
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tool_namespace: Option<String>,
    /// Namespace the generated class lives in, when it is not derived from
    /// the project default namespace and folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tool: Option<String>,
    #[serde(default)]
    pub item_type: ItemType,
}

impl ResourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_tool(mut self, tool: impl Into<String>) -> Self {
        self.custom_tool = Some(tool.into());
        self
    }

    pub fn with_custom_tool_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.custom_tool_namespace = Some(namespace.into());
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// File name without extension, as used in generated class names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace(' ', "_"))
            .unwrap_or_default()
    }

    pub fn is_resx(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("resx"))
    }

    /// VB's `My Project/Resources.resx`, whose members sit directly in
    /// `My.Resources`.
    pub fn is_default_resx(&self) -> bool {
        let segments = self.segments();
        segments.len() == 2
            && segments[0].eq_ignore_ascii_case("My Project")
            && segments[1].eq_ignore_ascii_case("Resources.resx")
    }

    /// Containing folder relative to the project root, `/`-separated.
    pub fn directory(&self) -> String {
        let segments = self.segments();
        segments[..segments.len().saturating_sub(1)].join("/")
    }

    pub fn is_global_resource(&self) -> bool {
        self.is_resx() && self.directory() == GLOBAL_RESOURCES_DIR
    }

    pub fn uses_custom_tool(&self, tool: &str) -> bool {
        self.custom_tool.as_deref() == Some(tool)
    }

    /// Namespace of the class generated for this file.
    ///
    /// C# projects derive it from the default namespace plus the folder path;
    /// VB generates into the root namespace, which VB code never spells out.
    pub fn namespace(&self, project: &Project) -> Option<String> {
        if let Some(namespace) = self.file_namespace.as_ref().filter(|ns| !ns.is_empty()) {
            return Some(namespace.clone());
        }
        if project.kind == ProjectKind::VisualBasic {
            return None;
        }

        let segments = self.segments();
        let folders = segments[..segments.len().saturating_sub(1)]
            .iter()
            .map(|folder| folder.replace(' ', "_"));
        let parts: Vec<String> = project
            .default_namespace
            .iter()
            .filter(|ns| !ns.is_empty())
            .cloned()
            .chain(folders)
            .collect();
        (!parts.is_empty()).then(|| parts.join("."))
    }

    fn segments(&self) -> Vec<String> {
        self.path
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    }
}

/// Resource file properties a strategy wants set when it adopts a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFileSettings {
    pub custom_tool: String,
    pub item_type: ItemType,
    pub custom_tool_namespace: Option<String>,
}

impl ResourceFileSettings {
    pub fn code_generator() -> Self {
        Self {
            custom_tool: RESX_CODE_GENERATOR.to_string(),
            item_type: ItemType::EmbeddedResource,
            custom_tool_namespace: None,
        }
    }

    pub fn global_resource() -> Self {
        Self {
            custom_tool: GLOBAL_RESOURCE_PROXY_GENERATOR.to_string(),
            item_type: ItemType::Content,
            custom_tool_namespace: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.custom_tool_namespace = Some(namespace.into());
        self
    }
}
