//! UniFFI bindings for copysmith host shells
//!
//! The host owns the rich-text surface; it forwards keystrokes and pastes
//! as commands and re-renders from the canonical markdown and HTML the
//! engine hands back. Offsets crossing the boundary are UTF-8 byte offsets
//! into the canonical markdown.

use copysmith_engine::content::{EmailVersion, ParsedVersions};
use copysmith_engine::slash::{SlashCommand, find_command};
use copysmith_engine::{Cmd, Editor, MessageView, Patch, SlashCompletion};
use std::ops::Range;
use std::sync::Mutex;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Unknown command: {reason}")]
    UnknownCommand { reason: String },
}

// ============ Editor Handle ============

/// A handle to one editing session.
#[derive(uniffi::Object)]
pub struct EditorHandle {
    inner: Mutex<Editor>,
}

impl EditorHandle {
    fn with_editor<T>(&self, f: impl FnOnce(&mut Editor) -> T) -> T {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        let mut editor = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut editor)
    }

    fn apply(&self, cmd: Cmd) -> PatchDto {
        self.with_editor(|editor| PatchDto::from_engine(editor.apply(cmd)))
    }
}

#[uniffi::export]
impl EditorHandle {
    /// Open a session on markdown content. The caret starts at the end.
    #[uniffi::constructor]
    pub fn new(markdown: String) -> Self {
        Self {
            inner: Mutex::new(Editor::new(&markdown)),
        }
    }

    /// Open a session on raw file bytes, which must be UTF-8.
    #[uniffi::constructor]
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FfiError> {
        let editor = Editor::from_bytes(&bytes).map_err(|e| FfiError::InvalidInput {
            reason: e.to_string(),
        })?;
        Ok(Self {
            inner: Mutex::new(editor),
        })
    }

    /// Canonical markdown.
    pub fn get_text(&self) -> String {
        self.with_editor(|editor| editor.text())
    }

    /// Rich-text projection of the current buffer.
    pub fn get_html(&self) -> String {
        self.with_editor(|editor| editor.html())
    }

    pub fn get_version(&self) -> u64 {
        self.with_editor(|editor| editor.version())
    }

    pub fn get_selection(&self) -> RangeDto {
        self.with_editor(|editor| RangeDto::from_engine(editor.selection()))
    }

    /// Caret position counted in characters, for hosts that index by char.
    pub fn get_caret_chars(&self) -> u64 {
        self.with_editor(|editor| editor.caret_chars() as u64)
    }

    pub fn set_selection(&self, start: u64, end: u64) {
        self.with_editor(|editor| editor.set_selection(to_range(start, end)));
    }

    pub fn insert_text(&self, at: u64, text: String) -> PatchDto {
        self.apply(Cmd::InsertText {
            at: at as usize,
            text,
        })
    }

    pub fn delete_range(&self, start: u64, end: u64) -> PatchDto {
        self.apply(Cmd::DeleteRange {
            range: to_range(start, end),
        })
    }

    pub fn replace_range(&self, start: u64, end: u64, text: String) -> PatchDto {
        self.apply(Cmd::ReplaceRange {
            range: to_range(start, end),
            text,
        })
    }

    /// Enter at `at`; `shift` adds a line inside the current list item.
    pub fn enter(&self, at: u64, shift: bool) -> PatchDto {
        self.apply(Cmd::Enter {
            at: at as usize,
            shift,
        })
    }

    /// Paste over `start..end`. Only the plain text is used.
    pub fn paste(&self, start: u64, end: u64, text: String, html: Option<String>) -> PatchDto {
        self.apply(Cmd::Paste {
            range: to_range(start, end),
            text,
            html,
        })
    }

    /// Replace the whole buffer with a value set from outside.
    pub fn set_markdown(&self, markdown: String) -> PatchDto {
        self.with_editor(|editor| PatchDto::from_engine(editor.set_markdown(&markdown)))
    }

    /// The partial `/token` before the caret, if the menu should be open.
    pub fn slash_query(&self) -> Option<SlashQueryDto> {
        self.with_editor(|editor| {
            editor.slash_query().map(|q| SlashQueryDto {
                range: RangeDto::from_engine(q.range),
                query: q.query,
            })
        })
    }

    /// Complete the active slash query with the built-in command `token`.
    ///
    /// Returns `None` when no query is active.
    pub fn complete_slash(&self, token: String) -> Result<Option<SlashCompletionDto>, FfiError> {
        let command = find_command(&token, None).ok_or_else(|| FfiError::UnknownCommand {
            reason: token.clone(),
        })?;
        Ok(self.with_editor(|editor| {
            editor
                .complete_slash(command)
                .map(SlashCompletionDto::from_engine)
        }))
    }
}

fn to_range(start: u64, end: u64) -> Range<usize> {
    let (start, end) = (start as usize, end as usize);
    start.min(end)..start.max(end)
}

// ============ DTOs ============

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct RangeDto {
    pub start: u64,
    pub end: u64,
}

impl RangeDto {
    fn from_engine(range: Range<usize>) -> Self {
        Self {
            start: range.start as u64,
            end: range.end as u64,
        }
    }
}

/// What an edit changed.
#[derive(Debug, Clone, uniffi::Record)]
pub struct PatchDto {
    /// Byte ranges of the new text that differ from before
    pub changed: Vec<RangeDto>,
    pub selection: RangeDto,
    /// Document version for change detection
    pub version: u64,
}

impl PatchDto {
    fn from_engine(patch: Patch) -> Self {
        Self {
            changed: patch.changed.into_iter().map(RangeDto::from_engine).collect(),
            selection: RangeDto::from_engine(patch.new_selection),
            version: patch.version,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct SlashQueryDto {
    pub range: RangeDto,
    pub query: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct SlashCompletionDto {
    /// Set when the command is an action; the host sends it upstream.
    pub prompt: Option<String>,
    pub patch: PatchDto,
}

impl SlashCompletionDto {
    fn from_engine(completion: SlashCompletion) -> Self {
        match completion {
            SlashCompletion::Inserted(patch) => Self {
                prompt: None,
                patch: PatchDto::from_engine(patch),
            },
            SlashCompletion::Submit { prompt, patch } => Self {
                prompt: Some(prompt),
                patch: PatchDto::from_engine(patch),
            },
        }
    }
}

/// A slash command for the menu.
#[derive(Debug, Clone, uniffi::Record)]
pub struct CommandDto {
    pub id: String,
    pub command: String,
    pub label: String,
    pub description: String,
    /// Category heading, e.g. "Refine"
    pub category: String,
    pub is_formatting: bool,
    pub shortcut: Option<String>,
}

impl CommandDto {
    fn from_engine(cmd: &SlashCommand) -> Self {
        Self {
            id: cmd.id.clone(),
            command: cmd.command.clone(),
            label: cmd.label.clone(),
            description: cmd.description.clone(),
            category: cmd.category.label().to_string(),
            is_formatting: cmd.is_formatting(),
            shortcut: cmd.shortcut.clone(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct VersionDto {
    pub id: String,
    pub label: String,
    pub strategy: Option<String>,
    pub content: String,
    pub is_partial: bool,
}

impl VersionDto {
    fn from_engine(version: EmailVersion) -> Self {
        Self {
            id: version.id,
            label: version.label,
            strategy: version.strategy,
            content: version.content,
            is_partial: version.is_partial,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct ParsedVersionsDto {
    pub has_versions: bool,
    pub before_content: String,
    pub between_content: Vec<String>,
    pub after_content: String,
    pub versions: Vec<VersionDto>,
    pub active_version: Option<String>,
}

impl ParsedVersionsDto {
    fn from_engine(parsed: ParsedVersions) -> Self {
        Self {
            has_versions: parsed.has_versions,
            before_content: parsed.before_content,
            between_content: parsed.between_content,
            after_content: parsed.after_content,
            versions: parsed.versions.into_iter().map(VersionDto::from_engine).collect(),
            active_version: parsed.active_version,
        }
    }
}

// ============ Standalone Functions ============

#[uniffi::export]
pub fn normalize_markdown(markdown: String) -> String {
    copysmith_engine::normalize_markdown(&markdown)
}

#[uniffi::export]
pub fn markdown_to_html(markdown: String) -> String {
    copysmith_engine::markdown::render_html(&copysmith_engine::markdown_to_structure(&markdown))
}

/// Built-in commands matching `query`, in catalog order.
#[uniffi::export]
pub fn filter_commands(query: String) -> Vec<CommandDto> {
    copysmith_engine::slash::filter_commands(&query)
        .into_iter()
        .map(CommandDto::from_engine)
        .collect()
}

#[uniffi::export]
pub fn parse_versions(text: String, streaming: bool) -> ParsedVersionsDto {
    ParsedVersionsDto::from_engine(copysmith_engine::content::parse_versions(&text, streaming))
}

/// Which renderer a message needs: "versions", "flow", "email" or "plain".
#[uniffi::export]
pub fn message_kind(text: String, streaming: bool) -> String {
    let kind = match copysmith_engine::content::classify_default(&text, streaming) {
        MessageView::Versions(_) => "versions",
        MessageView::Flow(_) => "flow",
        MessageView::Email(_) => "email",
        MessageView::Plain(_) => "plain",
    };
    kind.to_string()
}
