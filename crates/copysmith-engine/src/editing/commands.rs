use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::markdown::blocks::{
    LineClass, classify,
    kinds::{CodeFence, Continuation, FenceKind, NumberedItem},
};

use super::caret::clamp_to_boundary;

/// Commands that can be applied to the editor
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText {
        at: usize,
        text: String,
    },
    DeleteRange {
        range: Range<usize>,
    },
    ReplaceRange {
        range: Range<usize>,
        text: String,
    },
    /// Enter, or Shift+Enter when `shift` is set.
    ///
    /// Shift+Enter only differs inside a list item, where it adds a
    /// continuation line. Paragraphs, headings and quotes are single-line
    /// blocks, so anywhere else it starts a new line just like Enter.
    Enter {
        at: usize,
        shift: bool,
    },
    /// Clipboard paste. `html` is accepted and dropped: only plain text is
    /// ever inserted.
    Paste {
        range: Range<usize>,
        text: String,
        html: Option<String>,
    },
}

/// A single replacement plus where the caret lands afterwards, in the
/// coordinates of the edited (not yet normalized) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub text: String,
    pub caret: usize,
}

impl Edit {
    fn insert(at: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            range: at..at,
            caret: at + text.len(),
            text,
        }
    }

    fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            caret: range.start + text.len(),
            range,
            text,
        }
    }

    pub fn to_delta(&self, len: usize) -> Delta<RopeInfo> {
        let mut builder = Builder::new(len);
        builder.replace(self.range.clone(), Rope::from(self.text.as_str()));
        builder.build()
    }
}

/// Compile a command against the current text
pub(crate) fn compile_command(text: &str, cmd: &Cmd) -> Edit {
    match cmd {
        Cmd::InsertText { at, text: inserted } => {
            Edit::insert(clamp_to_boundary(text, *at), inserted.as_str())
        }
        Cmd::DeleteRange { range } => Edit::replace(clamp_range(text, range), ""),
        Cmd::ReplaceRange {
            range,
            text: replacement,
        } => Edit::replace(clamp_range(text, range), replacement.as_str()),
        Cmd::Enter { at, shift } => enter_edit(text, clamp_to_boundary(text, *at), *shift),
        Cmd::Paste {
            range,
            text: pasted,
            html,
        } => {
            if let Some(html) = html {
                log::debug!("discarding {} bytes of clipboard html", html.len());
            }
            Edit::replace(clamp_range(text, range), plain_paste(pasted))
        }
    }
}

fn clamp_range(text: &str, range: &Range<usize>) -> Range<usize> {
    let start = clamp_to_boundary(text, range.start);
    let end = clamp_to_boundary(text, range.end).max(start);
    start..end
}

fn plain_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// List marker of the item a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemMarker {
    Bullet(char),
    Numbered(u64),
}

struct ItemLine<'a> {
    line_start: usize,
    marker: ItemMarker,
    text: &'a str,
}

fn enter_edit(text: &str, at: usize, shift: bool) -> Edit {
    let line_start = line_start_of(text, at);
    if inside_fence(text, line_start) {
        return Edit::insert(at, "\n");
    }

    // Outside a list there is no soft break; both keys split the line.
    let Some(item) = owning_item(text, line_start) else {
        return Edit::insert(at, "\n");
    };

    if shift {
        return Edit::insert(at, format!("\n{}", Continuation::INDENT));
    }

    // Enter on an empty item leaves the list.
    if item.line_start == line_start && item.text.trim().is_empty() {
        let line_end = line_end_of(text, line_start);
        return Edit {
            range: line_start..line_end,
            text: String::new(),
            caret: line_start,
        };
    }

    let marker = match item.marker {
        ItemMarker::Bullet(c) => format!("{c} "),
        ItemMarker::Numbered(n) => {
            NumberedItem::prefix(usize::try_from(n.saturating_add(1)).unwrap_or(usize::MAX))
        }
    };
    Edit::insert(at, format!("\n{marker}"))
}

fn line_start_of(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end_of(text: &str, line_start: usize) -> usize {
    text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i)
}

/// Finds the list item owning the line at `line_start`, walking up over
/// soft-break continuation lines.
fn owning_item(text: &str, line_start: usize) -> Option<ItemLine<'_>> {
    let mut start = line_start;
    loop {
        let line = &text[start..line_end_of(text, start)];
        match classify(line) {
            LineClass::Bullet(item_text) => {
                return Some(ItemLine {
                    line_start: start,
                    marker: ItemMarker::Bullet(line.chars().next()?),
                    text: item_text,
                });
            }
            LineClass::Numbered {
                number,
                text: item_text,
            } => {
                return Some(ItemLine {
                    line_start: start,
                    marker: ItemMarker::Numbered(number),
                    text: item_text,
                });
            }
            LineClass::Indented { .. } if start > 0 => {
                start = line_start_of(text, start - 1);
            }
            _ => return None,
        }
    }
}

/// Whether the line starting at `line_start` sits inside an open fence.
fn inside_fence(text: &str, line_start: usize) -> bool {
    let mut open: Option<FenceKind> = None;
    for line in text[..line_start].split('\n') {
        match (open, CodeFence::sig(line)) {
            (None, Some(kind)) => open = Some(kind),
            (Some(kind), Some(sig)) if kind == sig => open = None,
            _ => {}
        }
    }
    open.is_some()
}
