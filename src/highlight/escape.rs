//! Minimal HTML escaping for code text.

use std::borrow::Cow;

/// Escape `&`, `<` and `>` for inclusion in HTML text content.
///
/// Every other character, quotes and non-ASCII included, is preserved
/// verbatim so that classification patterns can still match quote-delimited
/// strings after escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
