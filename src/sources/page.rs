//! Embedded payload extraction from the tour page

use quick_xml::escape::resolve_html5_entity;

use crate::error::ExtractionError;

/// Text right before the embedded JSON
pub const START_MARKER: &str = r#"kmtBoot.setProps(""#;
/// Text right after the embedded JSON
pub const END_MARKER: &str = r#"");"#;

/// Entities that may be written without the trailing `;`
const LEGACY_ENTITIES: &[&str] = &[
    "AMP", "COPY", "GT", "LT", "QUOT", "REG", "amp", "gt", "lt", "quot", "nbsp", "iexcl", "cent",
    "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf", "laquo", "not", "shy",
    "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot", "cedil",
    "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest", "Agrave", "Aacute", "Acirc",
    "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute", "Ecirc", "Euml", "Igrave",
    "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml",
    "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig", "agrave",
    "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil", "egrave", "eacute", "ecirc",
    "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde", "ograve", "oacute", "ocirc",
    "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn",
    "yuml",
];
const LONGEST_LEGACY_ENTITY: usize = 6;

/// Windows-1252 characters for the numeric references 0x80 to 0x9F
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Extract the JSON payload embedded in the page
///
/// The payload is entity escaped and then backslash escaped by the service,
/// so entities are resolved first and the backslash sequences after.
pub fn extract_payload(page: &str) -> Result<String, ExtractionError> {
    let start = page
        .find(START_MARKER)
        .ok_or(ExtractionError::StartMarkerNotFound)?
        + START_MARKER.len();

    let len = page[start..]
        .find(END_MARKER)
        .ok_or(ExtractionError::EndMarkerNotFound)?;

    let payload = unescape_entities(&page[start..start + len])
        .replace(r"\\", r"\")
        .replace(r#"\""#, "\"");

    Ok(payload)
}

/// Resolve HTML character references the way browsers do, keeping unknown ones as they are
fn unescape_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let used = match tail.strip_prefix('#') {
            Some(number) => push_numeric(number, &mut out).map(|used| used + 1),
            None => push_named(tail, &mut out),
        };

        match used {
            Some(used) => rest = &tail[used..],
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Push the character of `#65;`, `#x41` and the like, returning the bytes used after `#`
fn push_numeric(number: &str, out: &mut String) -> Option<usize> {
    let (skip, radix) = match number.bytes().next() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };

    let digits = number[skip..]
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digits == 0 {
        return None;
    }

    let end = skip + digits;
    let code = number[skip..end].chars().fold(0u32, |code, c| {
        code.saturating_mul(radix)
            .saturating_add(c.to_digit(radix).unwrap_or(0))
    });

    out.push(match code {
        0x80..=0x9F => WINDOWS_1252[(code - 0x80) as usize],
        _ => char::from_u32(code)
            .filter(|c| *c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    });

    Some(end + usize::from(number[end..].starts_with(';')))
}

/// Push the text of a named reference, returning the bytes used
///
/// Legacy entities are also matched without `;` and as a prefix of a longer name.
fn push_named(tail: &str, out: &mut String) -> Option<usize> {
    let len = tail.bytes().take_while(u8::is_ascii_alphanumeric).count();
    if len == 0 {
        return None;
    }
    let name = &tail[..len];

    if tail[len..].starts_with(';') {
        if let Some(text) = resolve_html5_entity(name) {
            out.push_str(text);
            return Some(len + 1);
        }
    }

    let (end, text) = (2..=len.min(LONGEST_LEGACY_ENTITY))
        .rev()
        .map(|end| &name[..end])
        .filter(|prefix| LEGACY_ENTITIES.contains(prefix))
        .find_map(|prefix| resolve_html5_entity(prefix).map(|text| (prefix.len(), text)))?;

    out.push_str(text);
    Some(end)
}
