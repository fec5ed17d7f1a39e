//! Text escaping for feed output.
//!
//! Text is XML-escaped first, then every entity and every non-ASCII
//! character is rewritten as a decimal numeric character reference. The
//! result is pure ASCII, so it survives feed readers that ignore the
//! declared encoding.

use quick_xml::escape::escape;

const NAMED_ENTITIES: &[(&str, u32)] = &[
    ("&lt;", 60),
    ("&gt;", 62),
    ("&amp;", 38),
    ("&apos;", 39),
    ("&quot;", 34),
];

/// Escapes `text` for use as XML character data or attribute value.
pub fn escape_feed_text(text: &str) -> String {
    let escaped = escape(text);
    let mut out = String::with_capacity(escaped.len());
    let mut rest: &str = &escaped;

    while let Some(c) = rest.chars().next() {
        if c == '&' {
            if let Some((entity, code)) = NAMED_ENTITIES
                .iter()
                .find(|(entity, _)| rest.starts_with(entity))
            {
                out.push_str(&format!("&#{code};"));
                rest = &rest[entity.len()..];
                continue;
            }
        }
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#{};", u32::from(c)));
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}
