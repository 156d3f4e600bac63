//! Block delimiters. Each kind owns its syntax: the classifier asks these
//! types whether a line opens them, and the serializer asks them for the
//! canonical prefix.

use crate::markdown::tree::HeadingLevel;

pub struct Heading;

impl Heading {
    pub const MARK: char = '#';

    /// `## text` → `(2, "text")`. Four or more marks are not a heading.
    pub fn strip(line: &str) -> Option<(HeadingLevel, &str)> {
        let marks = line.chars().take_while(|&c| c == Self::MARK).count();
        let level = HeadingLevel::new(u8::try_from(marks).ok()?)?;
        let text = line[marks..].strip_prefix(' ')?;
        Some((level, text))
    }

    pub fn prefix(level: HeadingLevel) -> String {
        let mut p = Self::MARK.to_string().repeat(usize::from(level.get()));
        p.push(' ');
        p
    }
}

pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: &'static str = "> ";

    pub fn strip(line: &str) -> Option<&str> {
        line.strip_prefix(Self::PREFIX)
    }
}

pub struct BulletItem;

impl BulletItem {
    pub const MARKERS: [char; 2] = ['-', '*'];
    /// Bullets always serialize with a dash, whatever was typed.
    pub const CANONICAL: &'static str = "- ";

    pub fn strip(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::MARKERS)?;
        rest.strip_prefix(' ')
    }
}

pub struct NumberedItem;

impl NumberedItem {
    const MAX_DIGITS: usize = 9;

    /// `12. text` → `(12, "text")`.
    pub fn strip(line: &str) -> Option<(u64, &str)> {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || digits > Self::MAX_DIGITS {
            return None;
        }
        let number = line[..digits].parse().ok()?;
        let text = line[digits..].strip_prefix(". ")?;
        Some((number, text))
    }

    pub fn prefix(number: usize) -> String {
        format!("{number}. ")
    }
}

/// Two-space indent that continues the previous list item on a new line.
pub struct Continuation;

impl Continuation {
    pub const INDENT: &'static str = "  ";

    pub fn strip(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::INDENT)?;
        (!rest.trim().is_empty()).then_some(rest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    const MAX_INDENT: usize = 3;

    pub fn sig(line: &str) -> Option<FenceKind> {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > Self::MAX_INDENT {
            return None;
        }
        if trimmed.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if trimmed.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    pub fn closes(kind: FenceKind, line: &str) -> bool {
        Self::sig(line) == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels() {
        let (level, text) = Heading::strip("### Title").unwrap();
        assert_eq!(level.get(), 3);
        assert_eq!(text, "Title");
        assert!(Heading::strip("#### Too deep").is_none());
        assert!(Heading::strip("#NoSpace").is_none());
        assert_eq!(Heading::strip("# ").map(|(_, t)| t), Some(""));
    }

    #[test]
    fn heading_prefix() {
        assert_eq!(Heading::prefix(HeadingLevel::new(2).unwrap()), "## ");
    }

    #[test]
    fn bullet_markers() {
        assert_eq!(BulletItem::strip("- a"), Some("a"));
        assert_eq!(BulletItem::strip("* a"), Some("a"));
        assert_eq!(BulletItem::strip("- "), Some(""));
        assert!(BulletItem::strip("-a").is_none());
        assert!(BulletItem::strip("+ a").is_none());
    }

    #[test]
    fn numbered_items() {
        assert_eq!(NumberedItem::strip("3. foo"), Some((3, "foo")));
        assert_eq!(NumberedItem::strip("10. "), Some((10, "")));
        assert!(NumberedItem::strip("3.foo").is_none());
        assert!(NumberedItem::strip("a. foo").is_none());
    }

    #[test]
    fn continuation_requires_content() {
        assert_eq!(Continuation::strip("  more"), Some("more"));
        assert!(Continuation::strip("   ").is_none());
        assert!(Continuation::strip(" one space").is_none());
    }

    #[test]
    fn fence_detection() {
        assert_eq!(CodeFence::sig("```rust"), Some(FenceKind::Backticks));
        assert_eq!(CodeFence::sig("~~~"), Some(FenceKind::Tildes));
        assert_eq!(CodeFence::sig("    ```"), None);
        assert!(CodeFence::closes(FenceKind::Backticks, "```"));
        assert!(!CodeFence::closes(FenceKind::Tildes, "```"));
    }
}
