//! Identifier escaping (CSSOM `CSS.escape`)

use std::fmt::Write;

/// Escape `ident` so it can be embedded in a selector as an identifier,
/// or inside a quoted attribute value.
pub fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();
    let single = ident.chars().nth(1).is_none();

    for (i, c) in ident.chars().enumerate() {
        match c {
            '\0' => out.push(char::REPLACEMENT_CHARACTER),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, c),
            '0'..='9' if i == 0 => push_code_point(&mut out, c),
            '0'..='9' if i == 1 && first == Some('-') => push_code_point(&mut out, c),
            '-' if i == 0 && single => out.push_str("\\-"),
            c if !c.is_ascii() || c.is_ascii_alphanumeric() || c == '-' || c == '_' => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

fn push_code_point(out: &mut String, c: char) {
    // Writing to a String cannot fail
    let _ = write!(out, "\\{:x} ", c as u32);
}
