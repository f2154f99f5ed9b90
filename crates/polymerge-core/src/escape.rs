//! Escaping for the literal-embedding strategy.
//!
//! Both embeddings go through the same three steps, in this order:
//!
//! 1. every backslash is doubled;
//! 2. characters that would end the physical line in either grammar (`\n`,
//!    `\r`, U+2028, U+2029) and NUL, which Python rejects in source, become
//!    escape sequences that read the same in both languages;
//! 3. the delimiters of the target literal are escaped.
//!
//! Step 1 must run first: later steps introduce backslashes of their own
//! that must not be doubled again.

/// Steps 1 and 2.
fn escape_line(source: &str) -> String {
    source
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
        .replace('\0', "\\x00")
}

/// Escape a payload for a Python `"""..."""` literal.
///
/// Every `"` is escaped, not only `"""` runs, so a payload ending in a quote
/// cannot merge with the closing delimiter.
pub fn escape_python_block(source: &str) -> String {
    escape_line(source).replace('"', "\\\"")
}

/// Escape a payload for a JavaScript `"..."` literal.
///
/// `'` is escaped as well: the literal sits inside a Python `'''` string, and
/// an escaped quote cannot terminate it.
pub fn escape_javascript_string(source: &str) -> String {
    escape_line(source)
        .replace('"', "\\\"")
        .replace('\'', "\\'")
}

/// Reverse either escaping. Returns `None` on a malformed escape sequence.
pub fn unescape(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'x' => out.push(hex_char(&mut chars, 2)?),
            'u' => out.push(hex_char(&mut chars, 4)?),
            _ => return None,
        }
    }

    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}
