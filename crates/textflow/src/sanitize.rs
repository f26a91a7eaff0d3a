//! Character sanitization for the target font encoding
//!
//! The output fonts are encoded for Western European text: printable ASCII
//! plus the Latin-1 supplement (accented letters). Anything outside that set
//! is substituted with a single space, character by character, so the
//! sanitized string keeps roughly the same width as the original.

/// Map a typographic character to its plain equivalent.
///
/// Returns `None` for characters that are not typographic punctuation.
fn map_typographic(c: char) -> Option<&'static str> {
    match c {
        // Curly single quotes and low/high variants
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => Some("'"),
        // Curly double quotes and low/high variants
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => Some("\""),
        // En dash, em dash, horizontal bar, minus sign, soft hyphen
        '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2212}' | '\u{00AD}' => Some("-"),
        // Ellipsis
        '\u{2026}' => Some("..."),
        // Space variants: no-break, en/em/thin/hair, narrow no-break
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2004}' | '\u{2005}' | '\u{2006}'
        | '\u{2007}' | '\u{2008}' | '\u{2009}' | '\u{200A}' | '\u{202F}' => Some(" "),
        _ => None,
    }
}

/// Check if a character can be rendered as-is by the target encoding.
///
/// Printable ASCII and the Latin-1 supplement (¡ through ÿ) pass through.
fn is_renderable(c: char) -> bool {
    matches!(c, ' '..='~') || ('\u{00A1}'..='\u{00FF}').contains(&c)
}

/// Normalize `text` to the character subset the output fonts support.
///
/// Typographic punctuation becomes its plain equivalent; renderable
/// characters pass through; everything else becomes a single space.
/// Idempotent: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(plain) = map_typographic(c) {
            out.push_str(plain);
        } else if is_renderable(c) {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    out
}

/// Stricter sanitization used after a draw failure: printable ASCII only.
///
/// Everything outside `' '..='~'` becomes a single space, including the
/// accented letters the normal pass keeps.
pub fn sanitize_fallback(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, ' '..='~') { c } else { ' ' })
        .collect()
}
