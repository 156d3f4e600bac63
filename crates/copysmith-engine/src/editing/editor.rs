use std::ops::Range;

use xi_rope::Rope;

use crate::editing::caret::{byte_offset, changed_range, char_offset, clamp_to_boundary};
use crate::editing::commands::compile_command;
use crate::editing::{Cmd, Patch};
use crate::markdown::{DocumentTree, markdown_to_structure, normalize_markdown, render_html};
use crate::slash::{CommandAction, SlashCommand, SlashQuery, active_query};

/// What completing a slash query did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCompletion {
    /// A formatting command replaced the query with its markdown syntax.
    Inserted(Patch),
    /// An action command removed the query; `prompt` goes upstream.
    Submit { prompt: String, patch: Patch },
}

/// A rich-text editing session over one canonical markdown buffer.
///
/// Every edit runs the full cycle: apply to the rope, rebuild the tree,
/// serialize back to canonical markdown, and restore the caret at the same
/// character offset (clamped to the end when the text got shorter).
///
/// ```rust
/// # use copysmith_engine::editing::{Cmd, Editor};
/// let mut editor = Editor::new("* one");
/// assert_eq!(editor.text(), "- one");
///
/// let end = editor.len();
/// editor.apply(Cmd::Enter { at: end, shift: false });
/// editor.apply(Cmd::InsertText { at: editor.caret(), text: "two".into() });
/// assert_eq!(editor.text(), "- one\n- two");
/// ```
#[derive(Debug, Clone)]
pub struct Editor {
    /// Canonical markdown, always equal to `normalize_markdown(buffer)`.
    pub(crate) buffer: Rope,
    pub(crate) tree: DocumentTree,
    /// Byte range into `buffer`.
    pub(crate) selection: Range<usize>,
    /// Incremented on every applied command.
    pub(crate) version: u64,
}

impl Editor {
    /// Opens `markdown`, normalizing it. The caret starts at the end.
    pub fn new(markdown: &str) -> Self {
        let canonical = normalize_markdown(markdown);
        let len = canonical.len();
        Self {
            tree: markdown_to_structure(&canonical),
            buffer: Rope::from(canonical.as_str()),
            selection: len..len,
            version: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// The canonical markdown value.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn html(&self) -> String {
        render_html(&self.tree)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Byte offset of the caret (the selection's end).
    pub fn caret(&self) -> usize {
        self.selection.end
    }

    /// Caret as a linear character offset, the unit hosts report.
    pub fn caret_chars(&self) -> usize {
        char_offset(&self.text(), self.selection.end)
    }

    pub fn set_selection(&mut self, range: Range<usize>) {
        let text = self.text();
        let start = clamp_to_boundary(&text, range.start);
        let end = clamp_to_boundary(&text, range.end);
        self.selection = start..end;
    }

    /// Apply command to the buffer
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let old = self.text();
        let edit = compile_command(&old, &cmd);
        log::trace!("apply {cmd:?} as {:?}", edit.range);

        let delta = edit.to_delta(self.buffer.len());
        let edited = delta.apply(&self.buffer).to_string();
        let caret_chars = char_offset(&edited, edit.caret);
        self.commit(&old, &edited, caret_chars)
    }

    /// Replaces the whole value, as when the host sets it from outside.
    /// The caret keeps its character offset.
    pub fn set_markdown(&mut self, markdown: &str) -> Patch {
        let old = self.text();
        let caret_chars = char_offset(&old, self.selection.end);
        self.commit(&old, markdown, caret_chars)
    }

    fn commit(&mut self, old: &str, edited: &str, caret_chars: usize) -> Patch {
        let canonical = normalize_markdown(edited);
        let caret = byte_offset(&canonical, caret_chars);

        self.tree = markdown_to_structure(&canonical);
        self.buffer = Rope::from(canonical.as_str());
        self.selection = caret..caret;
        self.version += 1;

        Patch {
            changed: changed_range(old, &canonical).into_iter().collect(),
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }

    /// The slash command being typed at a collapsed caret, if any.
    pub fn slash_query(&self) -> Option<SlashQuery> {
        if !self.selection.is_empty() {
            return None;
        }
        active_query(&self.text(), self.selection.end)
    }

    /// Completes the active slash query with `command`.
    ///
    /// Returns `None` when no query is active; the buffer is left alone.
    pub fn complete_slash(&mut self, command: &SlashCommand) -> Option<SlashCompletion> {
        let query = self.slash_query()?;
        let completion = match &command.action {
            CommandAction::Insert { syntax } => SlashCompletion::Inserted(self.apply(
                Cmd::ReplaceRange {
                    range: query.range,
                    text: syntax.clone(),
                },
            )),
            CommandAction::Prompt(prompt) => SlashCompletion::Submit {
                prompt: prompt.clone(),
                patch: self.apply(Cmd::DeleteRange { range: query.range }),
            },
        };
        Some(completion)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("")
    }
}
