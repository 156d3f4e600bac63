//! # Slash Commands
//!
//! A static catalog of `/token` commands plus the matching used while the
//! user types. User-defined commands are always passed in per call and put
//! in front of the built-ins; the built-in catalog is never mutated.
//!
//! - **`catalog`**: the built-in commands
//! - **`matcher`**: `CommandRegistry`, filtering, exact lookup, grouping
//! - **`invocation`**: parsing `/token args` input and the live query before the caret

pub mod catalog;
pub mod invocation;
pub mod matcher;

pub use invocation::{Expansion, Invocation, SlashQuery, active_query, expand_invocation, parse_invocation};
pub use matcher::{
    CommandRegistry, commands_by_category, filter_combined_commands, filter_commands, find_command,
};

/// Buckets commands are grouped into, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandCategory {
    Formatting,
    Refine,
    Tone,
    Structure,
    Custom,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 5] = [
        CommandCategory::Formatting,
        CommandCategory::Refine,
        CommandCategory::Tone,
        CommandCategory::Structure,
        CommandCategory::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommandCategory::Formatting => "Formatting",
            CommandCategory::Refine => "Refine",
            CommandCategory::Tone => "Tone",
            CommandCategory::Structure => "Structure",
            CommandCategory::Custom => "My shortcuts",
        }
    }
}

/// What running a command does. A command is either formatting or an
/// action, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Sends this prompt upstream.
    Prompt(String),
    /// Inserts literal markdown at the caret.
    Insert { syntax: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub id: String,
    /// Invocation token including the slash, e.g. `/shorten`.
    pub command: String,
    pub label: String,
    pub description: String,
    pub category: CommandCategory,
    pub action: CommandAction,
    /// Keyboard shortcut hint shown next to the label.
    pub shortcut: Option<String>,
}

impl SlashCommand {
    pub fn action(
        id: &str,
        command: &str,
        label: &str,
        description: &str,
        category: CommandCategory,
        prompt: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            command: command.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            category,
            action: CommandAction::Prompt(prompt.to_string()),
            shortcut: None,
        }
    }

    pub fn formatting(id: &str, command: &str, label: &str, description: &str, syntax: &str) -> Self {
        Self {
            id: id.to_string(),
            command: command.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            category: CommandCategory::Formatting,
            action: CommandAction::Insert {
                syntax: syntax.to_string(),
            },
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(shortcut.to_string());
        self
    }

    pub fn is_formatting(&self) -> bool {
        matches!(self.action, CommandAction::Insert { .. })
    }

    pub fn prompt(&self) -> Option<&str> {
        match &self.action {
            CommandAction::Prompt(prompt) => Some(prompt),
            CommandAction::Insert { .. } => None,
        }
    }

    pub fn syntax(&self) -> Option<&str> {
        match &self.action {
            CommandAction::Insert { syntax } => Some(syntax),
            CommandAction::Prompt(_) => None,
        }
    }

    /// Text the fuzzy filter searches: token, label and description.
    pub(crate) fn haystack(&self) -> String {
        format!("{}{}{}", self.command, self.label, self.description).to_lowercase()
    }
}
