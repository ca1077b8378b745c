//! Markup stripping for display text.
//!
//! Mastodon `content` is a constrained HTML fragment (`<p>`, `<br>`,
//! `<a>`, `<span>`, entities). The strip here is a single pass that drops
//! tags, turns block/line breaks into separators, and resolves the entity
//! set the API actually emits. It is not a general HTML parser.

/// Strips markup from a content fragment into a single display line.
///
/// `<br>` becomes a space, a `</p><p>` boundary becomes a single space,
/// entities are resolved, and the result is trimmed of leading/trailing
/// whitespace.
pub fn strip_markup(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(idx) = rest.find(['<', '&']) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];

        if rest.starts_with('<') {
            match rest.find('>') {
                Some(end) => {
                    if is_break_tag(&rest[1..end]) {
                        push_separator(&mut out);
                    }
                    rest = &rest[end + 1..];
                }
                None => {
                    // Unterminated tag: drop the remainder.
                    rest = "";
                }
            }
        } else {
            let (text, remainder) = resolve_entity(rest);
            out.push_str(&text);
            rest = remainder;
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Tags that separate lines of text once stripped.
fn is_break_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .trim_end_matches('/')
        .trim()
        .to_ascii_lowercase();
    matches!(name.as_str(), "br" | "p")
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Resolves one leading entity, returning its text and the remaining input.
///
/// Unknown or unterminated entities pass through verbatim.
fn resolve_entity(rest: &str) -> (String, &str) {
    let Some(end) = rest[1..].find(';').map(|i| i + 1) else {
        return ("&".to_string(), &rest[1..]);
    };
    let name = &rest[1..end];
    let remainder = &rest[end + 1..];

    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => name
            .strip_prefix("#x")
            .or_else(|| name.strip_prefix("#X"))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
            .and_then(char::from_u32),
    };

    match resolved {
        Some(c) => (c.to_string(), remainder),
        None => ("&".to_string(), &rest[1..]),
    }
}
