//! Split outbound text into platform-sized pieces.

/// Split `text` into contiguous slices of at most `max_len` characters.
///
/// Every slice has exactly `max_len` characters except possibly the last, and
/// concatenating the slices in order gives back `text`. Length is counted in
/// `char`s, so a multi-byte character is never cut in half. Empty input yields
/// no chunks. A `max_len` of zero is treated as one.
pub fn split(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max_len + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_len {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
