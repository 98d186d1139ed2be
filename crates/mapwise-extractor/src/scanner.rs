//! Brace-scoped scanning over raw source text
//!
//! The scanner counts delimiters and nothing else: braces or parentheses
//! inside string literals and comments are counted too. Unbalanced input is
//! never an error; the scan clamps to the end of the text.

/// Find the end of the brace block that opens at or after `start`
///
/// Counting begins at the first `{` seen from `start`. Returns the offset just
/// past the `}` that brings the depth back to zero, or `text.len()` when the
/// block never closes (or `start` is out of range).
///
/// # Examples
///
/// ```
/// use mapwise_extractor::find_block_end;
///
/// let text = "{a{b}c}d";
/// let end = find_block_end(text, 0);
/// assert_eq!(&text[..end], "{a{b}c}");
/// assert_eq!(find_block_end("{abc", 0), 4);
/// ```
pub fn find_block_end(text: &str, start: usize) -> usize {
    find_matching(text, start, b'{', b'}')
}

/// Find the end of the parenthesised group that opens at or after `start`
pub fn find_paren_end(text: &str, start: usize) -> usize {
    find_matching(text, start, b'(', b')')
}

/// Text between the `(` at `open` and its match, and the offset past the match
///
/// An unclosed group runs to the end of the text.
pub fn paren_contents(text: &str, open: usize) -> (&str, usize) {
    contents(text, open, find_paren_end(text, open), b')')
}

/// Text between the `{` at `open` and its match, and the offset past the match
pub fn brace_contents(text: &str, open: usize) -> (&str, usize) {
    contents(text, open, find_block_end(text, open), b'}')
}

fn contents(text: &str, open: usize, end: usize, close: u8) -> (&str, usize) {
    if open >= text.len() {
        return ("", text.len());
    }
    let inner_end = if end > open + 1 && text.as_bytes().get(end - 1) == Some(&close) {
        end - 1
    } else {
        end
    };
    (&text[open + 1..inner_end], end)
}

fn find_matching(text: &str, start: usize, open: u8, close: u8) -> usize {
    let bytes = text.as_bytes();
    if start >= bytes.len() {
        return bytes.len();
    }

    let mut depth = 0usize;
    let mut opened = false;
    for (offset, &byte) in bytes.iter().enumerate().skip(start) {
        if byte == open {
            depth += 1;
            opened = true;
        } else if byte == close && opened {
            depth -= 1;
            if depth == 0 {
                return offset + 1;
            }
        }
    }
    bytes.len()
}

/// Split `text` on `separator` where it is not nested in `()`, `<>`, `[]` or `{}`
///
/// Pieces are trimmed and empty pieces dropped.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut piece_start = 0;

    for (offset, ch) in text.char_indices() {
        match ch {
            '(' | '<' | '[' | '{' => depth += 1,
            ')' | '>' | ']' | '}' => depth -= 1,
            c if c == separator && depth <= 0 => {
                pieces.push(&text[piece_start..offset]);
                piece_start = offset + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[piece_start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
