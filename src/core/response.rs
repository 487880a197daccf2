//! Discord message length utilities
//!
//! Task digests and `/list` output grow with the number of tasks, so
//! anything user-facing goes through these helpers before sending.

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Split text into pieces that fit `max_size` bytes, preferring to break at
/// line boundaries and never splitting inside a UTF-8 character.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        // +1 for the newline this line carries
        if !current.is_empty() && current.len() + line.len() + 1 > max_size {
            chunks.push(current.trim_end().to_string());
            current = String::new();
        }
        if line.len() + 1 > max_size {
            chunks.extend(split_long_line(line, max_size));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

/// Character-by-character fallback for a single line longer than `max_size`.
fn split_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Truncate text to `limit` bytes on a UTF-8 boundary, with an ellipsis.
fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit - 3;
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit an embed description.
pub fn truncate_for_embed(text: &str) -> String {
    truncate_with_ellipsis(text, EMBED_LIMIT)
}

/// Truncate text to fit plain message content.
pub fn truncate_for_message(text: &str) -> String {
    truncate_with_ellipsis(text, MESSAGE_LIMIT)
}
