use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use quick_xml::{events::Event, Reader};
use regex::Regex;

use super::{NamespaceImport, ScanContext};
use crate::core::grammar::GrammarVariant;

static CSHARP_USING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*@using[ \t]+(?:(?P<alias>[A-Za-z_]\w*)[ \t]*=[ \t]*)?(?P<target>[A-Za-z_][\w.]*)[ \t]*;?[ \t]*$",
    )
    .unwrap()
});

static VB_IMPORTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*@Imports[ \t]+(?:(?P<alias>[A-Za-z_]\w*)[ \t]*=[ \t]*)?(?P<target>[A-Za-z_][\w.]*)[ \t]*$",
    )
    .unwrap()
});

static NAMESPACE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*@namespace[ \t]+(?P<name>[A-Za-z_][\w.]*)[ \t]*$").unwrap()
});

const VIEW_IMPORTS: &str = "_ViewImports.cshtml";
const WEB_CONFIG: &str = "web.config";
const RAZOR_NAMESPACES_PATH: [&str; 3] = ["system.web.webPages.razor", "pages", "namespaces"];

pub(super) fn razor_imports(
    variant: GrammarVariant,
    text: &str,
    context: &ScanContext<'_>,
) -> Vec<NamespaceImport> {
    let masked = variant.grammar().mask(text);
    let mut imports = Vec::new();

    if variant == GrammarVariant::CSharpRazor
        && let Some(caps) = NAMESPACE_DIRECTIVE.captures(&masked)
    {
        imports.push(NamespaceImport::new(&caps["name"]));
    }

    if context.ambient
        && let Some(path) = context.path
    {
        let directories = ambient_directories(path, context.project_root);
        imports.extend(web_config_namespaces(&directories));
        if variant == GrammarVariant::CSharpRazor {
            for dir in &directories {
                let Some(contents) = read_ambient(&dir.join(VIEW_IMPORTS)) else {
                    continue;
                };
                let masked = variant.grammar().mask(&contents);
                imports.extend(directives(variant, &contents, &masked));
            }
        }
    }

    imports.extend(directives(variant, text, &masked));
    imports
}

fn directives(variant: GrammarVariant, text: &str, masked: &str) -> Vec<NamespaceImport> {
    let pattern = match variant {
        GrammarVariant::VbRazor => &*VB_IMPORTS,
        _ => &*CSHARP_USING,
    };

    pattern
        .captures_iter(masked)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.name("target")?.as_str();
            let import = match caps.name("alias") {
                Some(alias) => NamespaceImport::aliased(alias.as_str(), target),
                None => NamespaceImport::new(target),
            };
            Some(import.with_original(text[whole.range()].trim()))
        })
        .collect()
}

/// Directories from the project root down to the one holding `path`.
///
/// Without a project root (or with a file outside it) only the file's own
/// directory is searched.
fn ambient_directories(path: &Path, project_root: Option<&Path>) -> Vec<PathBuf> {
    let Some(dir) = path.parent() else {
        return Vec::new();
    };

    let mut directories: Vec<PathBuf> = match project_root {
        Some(root) if dir.starts_with(root) => dir
            .ancestors()
            .take_while(|ancestor| ancestor.starts_with(root))
            .map(Path::to_path_buf)
            .collect(),
        _ => vec![dir.to_path_buf()],
    };
    directories.reverse();
    directories
}

fn read_ambient(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            tracing::debug!("skipping {}: {}", path.display(), err);
            None
        }
    }
}

/// `web.config` in `dir`, matched case-insensitively.
fn find_web_config(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .flatten()
        .find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(WEB_CONFIG))
        .map(|entry| entry.path())
}

/// Razor page namespaces configured along `directories`, outermost first.
/// Nested configs may `remove` or `clear` what an outer one added.
fn web_config_namespaces(directories: &[PathBuf]) -> Vec<NamespaceImport> {
    let mut namespaces: Vec<String> = Vec::new();

    for dir in directories {
        let Some(path) = find_web_config(dir) else {
            continue;
        };
        let Some(contents) = read_ambient(&path) else {
            continue;
        };
        if let Err(err) = apply_web_config(&contents, &mut namespaces) {
            tracing::debug!("ignoring malformed {}: {}", path.display(), err);
        }
    }

    namespaces.into_iter().map(NamespaceImport::new).collect()
}

fn apply_web_config(contents: &str, namespaces: &mut Vec<String>) -> quick_xml::Result<()> {
    let mut reader = Reader::from_str(contents);
    let mut stack: Vec<String> = Vec::new();
    // edits are staged so a file that fails halfway changes nothing
    let mut staged = namespaces.clone();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                if !in_razor_namespaces(&stack) {
                    continue;
                }
                let namespace = e
                    .attributes()
                    .flatten()
                    .filter(|attr| attr.key.as_ref() == b"namespace")
                    .find_map(|attr| attr.unescape_value().ok().map(|v| v.trim().to_string()));
                match (e.name().as_ref(), namespace) {
                    (b"add", Some(ns)) if !ns.is_empty() => staged.push(ns),
                    (b"remove", Some(ns)) => staged.retain(|existing| *existing != ns),
                    (b"clear", _) => staged.clear(),
                    _ => {}
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    *namespaces = staged;
    Ok(())
}

fn in_razor_namespaces(stack: &[String]) -> bool {
    stack.len() >= RAZOR_NAMESPACES_PATH.len()
        && stack[stack.len() - RAZOR_NAMESPACES_PATH.len()..]
            .iter()
            .zip(RAZOR_NAMESPACES_PATH)
            .all(|(element, expected)| element == expected)
}
