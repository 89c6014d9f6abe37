//! HTML to visible text.

use std::sync::OnceLock;

use regex::{Captures, Regex};

struct Patterns {
    hidden: Regex,
    comment: Regex,
    block_break: Regex,
    tag: Regex,
    entity: Regex,
    spaces: Regex,
}

/// Inside of a tag: anything but `>`, with quoted attribute values skipped whole.
const TAG_BODY: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*"#;

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        hidden: Regex::new(&format!(
            "(?is){}",
            ["script", "style", "noscript", "template"]
                .map(|name| format!(r"<{name}\b{TAG_BODY}>.*?</{name}\s*>"))
                .join("|")
        ))
        .expect("hidden-element pattern is valid"),
        comment: Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"),
        block_break: Regex::new(&format!(
            r"(?i)<br\b{TAG_BODY}>|</?(?:p|div|li|ul|ol|tr|table|h[1-6]|section|article|header|footer|nav|blockquote|pre|title)\b{TAG_BODY}>"
        ))
        .expect("block pattern is valid"),
        // `<` only opens a tag when a name, `/`, `!` or `?` follows it.
        tag: Regex::new(&format!(r"<[a-zA-Z/!?]{TAG_BODY}>")).expect("tag pattern is valid"),
        entity: Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z]{2,8});")
            .expect("entity pattern is valid"),
        spaces: Regex::new(r"[ \t\r\x{a0}\x{200b}]+").expect("space pattern is valid"),
    })
}

/// Strip markup from an HTML document, keeping only visible text.
///
/// Script, style, noscript and template bodies are removed with their tags.
/// Block-level tags become line breaks; runs of spaces collapse to one and
/// blank lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let p = patterns();
    let text = p.hidden.replace_all(html, "");
    let text = p.comment.replace_all(&text, "");
    let text = p.block_break.replace_all(&text, "\n");
    let text = p.tag.replace_all(&text, "");
    let text = p.entity.replace_all(&text, |caps: &Captures<'_>| decode_entity(&caps[1], &caps[0]));

    text.lines()
        .map(|line| p.spaces.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entity(name: &str, raw: &str) -> String {
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        named_entity(name)
    };
    decoded.map(String::from).unwrap_or_else(|| raw.to_string())
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "bull" => '•',
        "middot" => '·',
        "euro" => '€',
        "pound" => '£',
        "deg" => '°',
        _ => return None,
    })
}
