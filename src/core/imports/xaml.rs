use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use super::NamespaceImport;

/// The root element of a XAML document and the byte offset just past its
/// opening tag.
fn root_element(text: &str) -> Option<(BytesStart<'_>, usize, bool)> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => return Some((e, reader.buffer_position() as usize, false)),
            Ok(Event::Empty(e)) => return Some((e, reader.buffer_position() as usize, true)),
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("unable to read XAML root element: {}", err);
                return None;
            }
        }
    }
}

pub(super) fn xmlns_imports(text: &str) -> Vec<NamespaceImport> {
    let Some((root, _, _)) = root_element(text) else {
        return Vec::new();
    };

    root.attributes()
        .flatten()
        .filter_map(|attr| {
            let key = std::str::from_utf8(attr.key.as_ref()).ok()?.to_string();
            let value = attr.unescape_value().ok()?.into_owned();
            let import = if key == "xmlns" {
                NamespaceImport::new(value.clone())
            } else {
                let prefix = key.strip_prefix("xmlns:")?;
                NamespaceImport::aliased(prefix, value.clone())
            };
            Some(import.with_original(format!("{}=\"{}\"", key, value)))
        })
        .collect()
}

/// Offset right after the last attribute of the root element's opening tag,
/// where a new attribute can be inserted.
///
/// `None` when the document has no root element.
pub fn root_attribute_insertion_offset(text: &str) -> Option<usize> {
    let (_, tag_end, empty) = root_element(text)?;
    // position of `>` or of the `/` in `/>`
    let close = tag_end.checked_sub(if empty { 2 } else { 1 })?;
    Some(text.get(..close)?.trim_end().len())
}
