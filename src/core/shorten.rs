//! Shortest valid reference expression for a resource, given the imports in
//! scope at the literal.

use serde::Serialize;

use crate::core::{
    codec::Decoded,
    grammar::GrammarVariant,
    imports::{NamespaceImport, root_attribute_insertion_offset},
};
use crate::error::{Error, Result};

/// Text to insert at a byte offset of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub offset: usize,
    pub text: String,
}

/// A shortened reference and any edit the document needs for it to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenResult {
    pub text: String,
    pub required_edit: Option<TextEdit>,
}

impl ShortenResult {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            required_edit: None,
        }
    }
}

const CLR_NAMESPACE: &str = "clr-namespace:";

/// Shorten `reference` for use at the literal described by `decoded`.
///
/// `document_text` is only read for XAML, to place a missing `xmlns`
/// declaration.
pub fn shorten(
    variant: GrammarVariant,
    reference: &str,
    imports: &[NamespaceImport],
    document_text: &str,
    decoded: &Decoded,
) -> Result<ShortenResult> {
    match variant {
        GrammarVariant::CSharp | GrammarVariant::VisualBasic => {
            Ok(ShortenResult::plain(shorten_code(reference, imports)))
        }
        GrammarVariant::Xaml => shorten_xaml(reference, imports, document_text),
        GrammarVariant::CSharpRazor | GrammarVariant::VbRazor => {
            let text = shorten_code(reference, imports);
            if decoded.needs_markup_prefix {
                Ok(ShortenResult::plain(format!("@{}", text)))
            } else {
                Ok(ShortenResult::plain(text))
            }
        }
        GrammarVariant::Aspx => Ok(ShortenResult::plain(reference)),
    }
}

/// Drop (or alias) the longest imported namespace prefix of a dotted
/// reference. Ties go to the import declared first.
pub fn shorten_code(reference: &str, imports: &[NamespaceImport]) -> String {
    let Some((path, member)) = reference.rsplit_once('.') else {
        return reference.to_string();
    };

    let mut best: Option<&NamespaceImport> = None;
    for import in imports {
        let namespace = import.namespace.as_str();
        let matches = path != namespace
            && path
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('.'));
        if matches && best.is_none_or(|b| namespace.len() > b.namespace.len()) {
            best = Some(import);
        }
    }

    let Some(import) = best else {
        return reference.to_string();
    };
    let remainder = &path[import.namespace.len() + 1..];
    match &import.alias {
        Some(alias) => format!("{}.{}.{}", alias, remainder, member),
        None => format!("{}.{}", remainder, member),
    }
}

fn shorten_xaml(
    reference: &str,
    imports: &[NamespaceImport],
    document_text: &str,
) -> Result<ShortenResult> {
    let Some((clr, member)) = reference.split_once(':') else {
        return Ok(ShortenResult::plain(format!("{{x:Static {}}}", reference)));
    };

    let declared = imports.iter().find(|import| {
        import
            .namespace
            .strip_prefix(CLR_NAMESPACE)
            .map(|ns| ns.split(';').next().unwrap_or_default().trim())
            .is_some_and(|ns| ns == clr)
    });

    if let Some(import) = declared {
        let text = match &import.alias {
            Some(alias) => format!("{{x:Static {}:{}}}", alias, member),
            None => format!("{{x:Static {}}}", member),
        };
        return Ok(ShortenResult::plain(text));
    }

    let offset = root_attribute_insertion_offset(document_text).ok_or_else(|| {
        Error::MalformedMarkup {
            reason: "document has no root element to declare the namespace on".to_string(),
        }
    })?;

    Ok(ShortenResult {
        text: format!("{{x:Static {}:{}}}", clr, member),
        required_edit: Some(TextEdit {
            offset,
            text: format!(" xmlns:{}=\"{}{}\"", clr, CLR_NAMESPACE, clr),
        }),
    })
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    fn imports(namespaces: &[&str]) -> Vec<NamespaceImport> {
        namespaces.iter().map(|ns| NamespaceImport::new(*ns)).collect()
    }

    fn quoted() -> Decoded {
        crate::core::codec::decode("\"x\"", GrammarVariant::CSharp)
    }

    #[test]
    fn test_longest_prefix_is_dropped() {
        let reference = "System.Windows.Forms.TextBox";
        assert_eq!(
            shorten_code(reference, &imports(&["System.Windows", "System"])),
            "Forms.TextBox"
        );
        assert_eq!(
            shorten_code(
                reference,
                &imports(&["Microsoft.VS", "System.Windows.Forms.TextBox", "System"])
            ),
            "Windows.Forms.TextBox"
        );
    }

    #[test]
    fn test_no_imports_leaves_reference() {
        assert_eq!(shorten_code("A.B.C", &[]), "A.B.C");
        assert_eq!(shorten_code("Plain", &imports(&["Plain"])), "Plain");
    }

    #[test]
    fn test_namespace_equal_to_path_is_kept() {
        assert_eq!(
            shorten_code("WindowsForms1.Resource1.Test", &imports(&["WindowsForms1.Resource1"])),
            "WindowsForms1.Resource1.Test"
        );
    }

    #[test]
    fn test_partial_segment_is_not_a_prefix() {
        assert_eq!(
            shorten_code("SystemX.Res.Key", &imports(&["System"])),
            "SystemX.Res.Key"
        );
    }

    #[test]
    fn test_alias_replaces_prefix() {
        let imports = vec![
            NamespaceImport::new("App"),
            NamespaceImport::aliased("R", "App.Properties"),
        ];
        assert_eq!(
            shorten_code("App.Properties.Strings.Greeting", &imports),
            "R.Strings.Greeting"
        );
    }

    #[test]
    fn test_first_declared_wins_ties() {
        let imports = vec![
            NamespaceImport::aliased("First", "App.Res"),
            NamespaceImport::aliased("Second", "App.Res"),
        ];
        assert_eq!(shorten_code("App.Res.Strings.Key", &imports), "First.Strings.Key");
    }

    #[test]
    fn test_razor_markup_prefix() {
        let bare = crate::core::codec::decode("Welcome", GrammarVariant::CSharpRazor);
        let result = shorten(
            GrammarVariant::CSharpRazor,
            "Shop.Resources.Strings.Welcome",
            &imports(&["Shop"]),
            "",
            &bare,
        )
        .unwrap();
        assert_eq!(result, ShortenResult::plain("@Resources.Strings.Welcome"));

        let result = shorten(
            GrammarVariant::CSharpRazor,
            "Shop.Resources.Strings.Welcome",
            &imports(&["Shop"]),
            "",
            &quoted(),
        )
        .unwrap();
        assert_eq!(result.text, "Resources.Strings.Welcome");
    }

    #[test]
    fn test_aspx_is_identity() {
        let reference = "\"<%$ Resources:Strings, Hello %>\"";
        let result = shorten(GrammarVariant::Aspx, reference, &[], "", &quoted()).unwrap();
        assert_eq!(result.text, reference);
    }

    #[test]
    fn test_xaml_declared_prefix() {
        let imports = vec![
            NamespaceImport::new("http://schemas.microsoft.com/winfx/2006/xaml/presentation"),
            NamespaceImport::aliased("p", "clr-namespace:WpfApp.Properties;assembly=WpfApp"),
        ];
        let result = shorten(
            GrammarVariant::Xaml,
            "WpfApp.Properties:Resources.Title",
            &imports,
            "<Window/>",
            &quoted(),
        )
        .unwrap();
        assert_eq!(result, ShortenResult::plain("{x:Static p:Resources.Title}"));
    }

    #[test]
    fn test_xaml_default_namespace_match() {
        let imports = vec![NamespaceImport::new("clr-namespace:WpfApp.Properties")];
        let result = shorten(
            GrammarVariant::Xaml,
            "WpfApp.Properties:Resources.Title",
            &imports,
            "<Window/>",
            &quoted(),
        )
        .unwrap();
        assert_eq!(result.text, "{x:Static Resources.Title}");
    }

    #[test]
    fn test_xaml_missing_prefix_requires_declaration() {
        let document = "<Window xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\">\n  <Button Content=\"Go\"/>\n</Window>";
        let result = shorten(
            GrammarVariant::Xaml,
            "WpfApp.Properties:Resources.Go",
            &[],
            document,
            &quoted(),
        )
        .unwrap();

        assert_eq!(result.text, "{x:Static WpfApp.Properties:Resources.Go}");
        let edit = result.required_edit.unwrap();
        let mut edited = document.to_string();
        edited.insert_str(edit.offset, &edit.text);
        assert_snapshot!(edited, @r#"
        <Window xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation" xmlns:WpfApp.Properties="clr-namespace:WpfApp.Properties">
          <Button Content="Go"/>
        </Window>
        "#);
    }

    #[test]
    fn test_xaml_without_root_is_malformed() {
        let err = shorten(GrammarVariant::Xaml, "Ns:Res.Key", &[], "<!-- -->", &quoted()).unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { .. }));
    }

    #[test]
    fn test_xaml_reference_without_prefix() {
        let result = shorten(GrammarVariant::Xaml, "Resources.Key", &[], "", &quoted()).unwrap();
        assert_eq!(result, ShortenResult::plain("{x:Static Resources.Key}"));
    }
}
