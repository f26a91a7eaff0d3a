//! Tag resolution
//!
//! Expands placeholder tokens in free text into concrete values from a
//! [`DataContext`]. The scan makes a single forward pass over the input:
//! substituted values are appended to the output and never rescanned, so a
//! value that happens to contain token-like syntax cannot trigger another
//! substitution.

use crate::catalog::Field;
use crate::context::DataContext;
use crate::RenderWarning;

/// The outcome of resolving one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub warnings: Vec<RenderWarning>,
}

/// Expand every token in `text` against `context`.
///
/// Known tokens become their field value, or `[<label> not available]` when
/// the value is empty or absent. Unknown tokens become
/// `[Information "<name>" not available]`. Both degradations are recorded as
/// warnings; resolution itself never fails.
pub fn resolve(text: &str, context: &DataContext) -> Resolution {
    let mut out = String::with_capacity(text.len());
    let mut warnings = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match parse_token(tail) {
            Some((token_len, name)) => {
                match Field::from_name(name) {
                    Some(field) => match field.value(context) {
                        Some(value) if !value.trim().is_empty() => out.push_str(value),
                        _ => {
                            out.push_str(&format!("[{} not available]", field.label()));
                            warnings.push(RenderWarning::MissingField { field });
                        }
                    },
                    None => {
                        out.push_str(&format!("[Information \"{name}\" not available]"));
                        warnings.push(RenderWarning::UnresolvedTag {
                            name: name.to_string(),
                        });
                    }
                }
                rest = &tail[token_len..];
            }
            None => {
                // A lone '<' that does not open a token passes through
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Resolution {
        text: out,
        warnings,
    }
}

/// Try to read a `<identifier>` token at the start of `s`.
///
/// Returns the token's byte length and the identifier inside the brackets.
/// Identifiers are ASCII alphanumeric and start with a letter.
fn parse_token(s: &str) -> Option<(usize, &str)> {
    let inner = &s[1..];
    let end = inner.find('>')?;
    let name = &inner[..end];

    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some((end + 2, name))
}
