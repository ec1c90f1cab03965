use std::sync::LazyLock;

use regex::Regex;

use super::NamespaceImport;
use crate::core::grammar::GrammarVariant;

// Scanned over masked text, so braces and keywords inside strings or comments
// are already blanked out.
static CSHARP_DECLARATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<ns>\bnamespace\s+(?P<name>[A-Za-z_@][\w.]*)\s*(?P<term>[{;]))",
        r"|(?P<using>\b(?:global\s+)?using\s+(?:static\s+)?",
        r"(?:(?P<alias>[A-Za-z_]\w*)\s*=\s*)?(?:global::)?(?P<target>[A-Za-z_][\w.]*)\s*;)",
        r"|(?P<open>\{)|(?P<close>\})",
    ))
    .unwrap()
});

static VB_DECLARATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?im)^[ \t]*(?:",
        r"(?P<ns>Namespace[ \t]+(?P<name>[\w.]+))",
        r"|(?P<end>End[ \t]+Namespace\b)",
        r"|(?P<imports>Imports[ \t]+(?P<clauses>[^\n]+))",
        r")",
    ))
    .unwrap()
});

static VB_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<alias>[A-Za-z_]\w*)\s*=\s*)?(?P<target>[A-Za-z_][\w.]*)$").unwrap()
});

/// A `namespace` block (or the file itself) and the `using`s declared in it.
struct Scope {
    name: Option<String>,
    depth: usize,
    usings: Vec<NamespaceImport>,
}

pub(super) fn csharp_imports(text: &str, position: usize) -> Vec<NamespaceImport> {
    let masked = GrammarVariant::CSharp.grammar().mask(text);

    let mut scopes = vec![Scope {
        name: None,
        depth: 0,
        usings: Vec::new(),
    }];
    let mut depth = 0usize;

    for caps in CSHARP_DECLARATIONS.captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() >= position {
            break;
        }

        if let Some(name) = caps.name("name") {
            let name = name.as_str().trim_start_matches('@').to_string();
            if caps.name("term").is_some_and(|t| t.as_str() == ";") {
                // file-scoped namespace applies to the rest of the file
                scopes[0].name = Some(name);
            } else {
                depth += 1;
                scopes.push(Scope {
                    name: Some(name),
                    depth,
                    usings: Vec::new(),
                });
            }
        } else if let Some(target) = caps.name("target") {
            let import = match caps.name("alias") {
                Some(alias) => NamespaceImport::aliased(alias.as_str(), target.as_str()),
                None => NamespaceImport::new(target.as_str()),
            };
            if let Some(scope) = scopes.last_mut() {
                scope.usings.push(import.with_original(&text[whole.range()]));
            }
        } else if caps.name("open").is_some() {
            depth += 1;
        } else if caps.name("close").is_some() {
            if scopes.len() > 1 && scopes.last().is_some_and(|s| s.depth == depth) {
                scopes.pop();
            }
            depth = depth.saturating_sub(1);
        }
    }

    collect(scopes)
}

pub(super) fn vb_imports(text: &str, position: usize) -> Vec<NamespaceImport> {
    let masked = GrammarVariant::VisualBasic.grammar().mask(text);

    let mut scopes = vec![Scope {
        name: None,
        depth: 0,
        usings: Vec::new(),
    }];

    for caps in VB_DECLARATIONS.captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() >= position {
            break;
        }

        if let Some(name) = caps.name("name") {
            let name = strip_global(name.as_str());
            let depth = scopes.len();
            scopes.push(Scope {
                name: Some(name.to_string()),
                depth,
                usings: Vec::new(),
            });
        } else if caps.name("end").is_some() {
            if scopes.len() > 1 {
                scopes.pop();
            }
        } else if let Some(clauses) = caps.name("clauses") {
            let imports = clauses
                .as_str()
                .split(',')
                .filter_map(|clause| VB_CLAUSE.captures(clause.trim()))
                .filter_map(|clause| {
                    let target = strip_global(clause.name("target")?.as_str());
                    let import = match clause.name("alias") {
                        Some(alias) => NamespaceImport::aliased(alias.as_str(), target),
                        None => NamespaceImport::new(target),
                    };
                    Some(import.with_original(format!("Imports {}", clause[0].trim())))
                });
            if let Some(scope) = scopes.last_mut() {
                scope.usings.extend(imports);
            }
        }
    }

    collect(scopes)
}

fn strip_global(name: &str) -> &str {
    match name.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("Global.") => &name[7..],
        _ => name,
    }
}

/// Enclosing namespace first, then every in-scope import from the outside in.
fn collect(scopes: Vec<Scope>) -> Vec<NamespaceImport> {
    let enclosing: Vec<&str> = scopes.iter().filter_map(|s| s.name.as_deref()).collect();

    let mut imports = Vec::new();
    if !enclosing.is_empty() {
        imports.push(NamespaceImport::new(enclosing.join(".")));
    }
    imports.extend(scopes.into_iter().flat_map(|s| s.usings));
    imports
}
