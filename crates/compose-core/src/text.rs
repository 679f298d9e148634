//! Internal character-offset helpers.
//!
//! Buffers are indexed by character (Unicode scalar value) offsets throughout the
//! crate, while `&str` slicing needs byte indices. These helpers do the mapping.

/// Total character count of a buffer.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `char_offset`, or `text.len()` when the offset
/// points one past the last character.
pub(crate) fn byte_of_char(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Slice a buffer by a character-offset range. Offsets past the end clamp to the
/// end of the buffer.
pub(crate) fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_of_char(text, start);
    let end_byte = byte_of_char(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Character offset of the start of the line containing `char_offset`: the offset
/// just after the nearest preceding `'\n'`, or 0 when there is none.
pub(crate) fn line_start_char(text: &str, char_offset: usize) -> usize {
    text.chars()
        .take(char_offset)
        .enumerate()
        .filter(|(_, c)| *c == '\n')
        .map(|(i, _)| i + 1)
        .last()
        .unwrap_or(0)
}

/// Normalize CRLF line breaks to LF.
///
/// Browser textareas hand back LF-normalized values, but content loaded from the
/// post store may still carry CRLF from pasted text.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}
