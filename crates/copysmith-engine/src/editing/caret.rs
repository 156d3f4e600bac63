//! Caret bookkeeping across normalization.
//!
//! The host reports and restores the caret as a linear character offset;
//! the rope works in bytes. These helpers convert between the two and
//! clamp offsets that no longer resolve.

use std::ops::Range;

/// Largest char boundary at or below `offset`, clamped to the text length.
pub fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Character offset of byte offset `byte`.
pub fn char_offset(text: &str, byte: usize) -> usize {
    text[..clamp_to_boundary(text, byte)].chars().count()
}

/// Byte offset of character offset `chars`; past the end clamps to the end.
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| i)
}

/// The byte range of `new` that differs from `old`, or `None` if equal.
pub fn changed_range(old: &str, new: &str) -> Option<Range<usize>> {
    if old == new {
        return None;
    }
    let prefix = old
        .char_indices()
        .zip(new.chars())
        .find(|&((_, a), b)| a != b)
        .map_or(old.len().min(new.len()), |((i, _), _)| i);

    let max_suffix = old.len().min(new.len()) - prefix;
    let mut suffix = old
        .bytes()
        .rev()
        .zip(new.bytes().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    while !new.is_char_boundary(new.len() - suffix) {
        suffix -= 1;
    }
    Some(prefix..new.len() - suffix)
}
