//! Raw literal text to logical value, per grammar variant.
//!
//! Decoding never fails. Escapes the language would reject are kept as
//! written. In markup a bare `&` or an unknown entity stays as written while
//! the references around it are still resolved.

use quick_xml::escape::{escape, unescape_with};

use crate::core::grammar::GrammarVariant;

/// Decoded value of a literal plus what the replacement needs to know about
/// where the literal sat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub value: String,
    /// Quote char delimiting the literal, `None` for bare inner text.
    pub quote: Option<char>,
    /// Bare Razor inner text: a code reference must be written as `@Ref`.
    pub needs_markup_prefix: bool,
}

impl Decoded {
    fn quoted(value: String, quote: char) -> Self {
        Self {
            value,
            quote: Some(quote),
            needs_markup_prefix: false,
        }
    }

    fn bare(value: String, needs_markup_prefix: bool) -> Self {
        Self {
            value,
            quote: None,
            needs_markup_prefix,
        }
    }
}

/// Decode the raw text of a literal span.
pub fn decode(raw: &str, variant: GrammarVariant) -> Decoded {
    match variant {
        GrammarVariant::CSharp => decode_csharp(raw),
        GrammarVariant::VisualBasic => decode_vb(raw),
        GrammarVariant::Xaml => match strip_quotes(raw) {
            Some((quote, body)) => Decoded::quoted(unescape_markup(body, false), quote),
            None => Decoded::bare(unescape_markup(raw, false), false),
        },
        GrammarVariant::CSharpRazor | GrammarVariant::VbRazor => {
            if raw.starts_with('@') {
                Decoded::quoted(decode_verbatim(raw), '"')
            } else if raw.starts_with('"') {
                decode(raw, variant.host())
            } else {
                Decoded::bare(raw.trim().to_string(), true)
            }
        }
        GrammarVariant::Aspx => match strip_quotes(raw) {
            Some((quote, body)) => Decoded::quoted(unescape_markup(body, true), quote),
            None => Decoded::bare(unescape_markup(raw, true), false),
        },
    }
}

/// Quote a value as a simple literal of `variant`.
///
/// For C# and VB `decode(&encode_simple(s, v), v).value == s` holds for any
/// `s` the language can express in a single-line literal.
pub fn encode_simple(value: &str, variant: GrammarVariant) -> String {
    match variant.host() {
        GrammarVariant::CSharp => {
            let mut out = String::with_capacity(value.len() + 2);
            out.push('"');
            for c in value.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    '\0' => out.push_str("\\0"),
                    c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
                    c => out.push(c),
                }
            }
            out.push('"');
            out
        }
        GrammarVariant::VisualBasic => format!("\"{}\"", value.replace('"', "\"\"")),
        _ => format!("\"{}\"", escape(value)),
    }
}

fn decode_csharp(raw: &str) -> Decoded {
    if raw.starts_with('@') {
        return Decoded::quoted(decode_verbatim(raw), '"');
    }
    match strip_quotes(raw) {
        Some((quote, body)) => Decoded::quoted(unescape_backslashes(body), quote),
        None => Decoded::bare(unescape_backslashes(raw), false),
    }
}

fn decode_vb(raw: &str) -> Decoded {
    match strip_quotes(raw) {
        Some((quote, body)) => Decoded::quoted(body.replace("\"\"", "\""), quote),
        None => Decoded::bare(raw.to_string(), false),
    }
}

/// `@"..."`: drop `@"` and the closing quote, `""` is a quote.
fn decode_verbatim(raw: &str) -> String {
    let body = raw.strip_prefix("@\"").unwrap_or(raw);
    let body = body.strip_suffix('"').unwrap_or(body);
    body.replace("\"\"", "\"")
}

/// Split a literal wrapped in matching `"` or `'` quotes.
fn strip_quotes(raw: &str) -> Option<(char, &str)> {
    let quote = raw.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = raw.strip_prefix(quote)?.strip_suffix(quote)?;
    Some((quote, body))
}

fn unescape_backslashes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        let Some(c) = rest.chars().next() else {
            out.push('\\');
            break;
        };
        rest = &rest[c.len_utf8()..];

        let simple = match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'v' => Some('\u{b}'),
            '\\' | '\'' | '"' => Some(c),
            _ => None,
        };
        if let Some(ch) = simple {
            out.push(ch);
            continue;
        }

        let decoded = match c {
            'x' => hex_prefix(rest, 1, 4).and_then(|(v, n)| Some((char::from_u32(v)?, n))),
            'u' => utf16_escape(rest),
            'U' => hex_prefix(rest, 8, 8).and_then(|(v, n)| Some((char::from_u32(v)?, n))),
            _ => None,
        };
        match decoded {
            Some((ch, used)) => {
                out.push(ch);
                rest = &rest[used..];
            }
            None => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out.push_str(rest);
    out
}

/// `\uXXXX`, combining a surrogate pair written as two escapes.
fn utf16_escape(rest: &str) -> Option<(char, usize)> {
    let (high, used) = hex_prefix(rest, 4, 4)?;
    if let Some(ch) = char::from_u32(high) {
        return Some((ch, used));
    }
    let low_rest = rest[used..].strip_prefix("\\u")?;
    let (low, low_used) = hex_prefix(low_rest, 4, 4)?;
    if !(0xD800..0xDC00).contains(&high) || !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    Some((char::from_u32(combined)?, used + 2 + low_used))
}

/// Parse between `min` and `max` leading hex digits.
fn hex_prefix(s: &str, min: usize, max: usize) -> Option<(u32, usize)> {
    let len = s
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    if len < min {
        return None;
    }
    u32::from_str_radix(&s[..len], 16).ok().map(|v| (v, len))
}

/// Resolve character and entity references one at a time. A bare `&` or an
/// unknown entity is copied through unchanged.
fn unescape_markup(body: &str, html: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let reference = entity_reference(tail);
        let resolved = reference.and_then(|reference| {
            unescape_with(reference, |entity| {
                xml_entity(entity).or_else(|| if html { html_entity(entity) } else { None })
            })
            .ok()
        });
        match (reference, resolved) {
            (Some(reference), Some(value)) => {
                out.push_str(&value);
                rest = &tail[reference.len()..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `&name;` or `&#..;` at the start of `text`, terminator included.
fn entity_reference(text: &str) -> Option<&str> {
    let end = text[1..].find(|c: char| !(c == '#' || c.is_ascii_alphanumeric()))? + 1;
    (end > 1 && text[end..].starts_with(';')).then(|| &text[..=end])
}

fn xml_entity(name: &str) -> Option<&'static str> {
    match name {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        _ => None,
    }
}

/// Named entities that show up in hand-written ASP.NET markup.
fn html_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "hellip" => "\u{2026}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "auml" => "\u{e4}",
        "ouml" => "\u{f6}",
        "uuml" => "\u{fc}",
        "Auml" => "\u{c4}",
        "Ouml" => "\u{d6}",
        "Uuml" => "\u{dc}",
        "szlig" => "\u{df}",
        "eacute" => "\u{e9}",
        "egrave" => "\u{e8}",
        "agrave" => "\u{e0}",
        "ccedil" => "\u{e7}",
        "ntilde" => "\u{f1}",
        _ => return None,
    };
    Some(value)
}
