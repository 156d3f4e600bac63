use crate::markdown::tree::HeadingLevel;

use super::kinds::{BlockQuote, BulletItem, CodeFence, Continuation, FenceKind, Heading, NumberedItem};

/// Local facts about one line, decided without looking at its neighbours.
///
/// Phase 1 of block parsing; the builder adds context (open lists, fences).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    Fence(FenceKind),
    Heading { level: HeadingLevel, text: &'a str },
    Quote(&'a str),
    Bullet(&'a str),
    Numbered { number: u64, text: &'a str },
    /// Two-space indented line; continues a list item if one is open.
    Indented { text: &'a str },
    Text(&'a str),
}

/// Classifies a line in priority order: fence, heading, blockquote,
/// bullet, numbered, blank, indented, paragraph text.
pub fn classify(line: &str) -> LineClass<'_> {
    if let Some(kind) = CodeFence::sig(line) {
        return LineClass::Fence(kind);
    }
    if let Some((level, text)) = Heading::strip(line) {
        return LineClass::Heading { level, text };
    }
    if let Some(text) = BlockQuote::strip(line) {
        return LineClass::Quote(text);
    }
    if let Some(text) = BulletItem::strip(line) {
        return LineClass::Bullet(text);
    }
    if let Some((number, text)) = NumberedItem::strip(line) {
        return LineClass::Numbered { number, text };
    }
    if line.is_empty() {
        return LineClass::Blank;
    }
    if let Some(text) = Continuation::strip(line) {
        return LineClass::Indented { text };
    }
    LineClass::Text(line)
}
