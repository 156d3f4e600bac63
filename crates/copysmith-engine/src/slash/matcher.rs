use std::{collections::BTreeMap, sync::LazyLock};

use super::{CommandCategory, SlashCommand, catalog::BUILTIN_COMMANDS};

/// An immutable command catalog.
///
/// `CommandRegistry::builtin()` wraps the static catalog; tests and hosts
/// can inject their own list with `CommandRegistry::new`.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: std::borrow::Cow<'static, [SlashCommand]>,
}

impl CommandRegistry {
    pub fn builtin() -> Self {
        let commands: &'static [SlashCommand] = &BUILTIN_COMMANDS;
        Self {
            commands: std::borrow::Cow::Borrowed(commands),
        }
    }

    pub fn new(commands: Vec<SlashCommand>) -> Self {
        Self {
            commands: std::borrow::Cow::Owned(commands),
        }
    }

    pub fn commands(&self) -> &[SlashCommand] {
        &self.commands
    }

    pub fn filter(&self, query: &str) -> Vec<&SlashCommand> {
        matching(self.commands.iter(), query)
    }

    /// Like [`filter`](Self::filter), with `user` commands listed first.
    pub fn filter_combined<'a>(
        &'a self,
        query: &str,
        user: &'a [SlashCommand],
    ) -> Vec<&'a SlashCommand> {
        matching(user.iter().chain(self.commands.iter()), query)
    }

    /// Exact, case-insensitive lookup of the first token of `input`.
    /// User commands win over built-ins with the same token.
    pub fn find<'a>(
        &'a self,
        input: &str,
        user: Option<&'a [SlashCommand]>,
    ) -> Option<&'a SlashCommand> {
        let token = input.split_whitespace().next()?;
        user.unwrap_or_default()
            .iter()
            .chain(self.commands.iter())
            .find(|cmd| cmd.command.eq_ignore_ascii_case(token))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN: LazyLock<CommandRegistry> = LazyLock::new(CommandRegistry::builtin);

/// Filters the built-in catalog.
pub fn filter_commands(query: &str) -> Vec<&'static SlashCommand> {
    BUILTIN.filter(query)
}

/// Filters `user` commands followed by the built-in catalog.
pub fn filter_combined_commands<'a>(query: &str, user: &'a [SlashCommand]) -> Vec<&'a SlashCommand> {
    BUILTIN.filter_combined(query, user)
}

/// [`CommandRegistry::find`] over the built-in catalog.
pub fn find_command<'a>(input: &str, user: Option<&'a [SlashCommand]>) -> Option<&'a SlashCommand> {
    BUILTIN.find(input, user)
}

/// Groups commands by category, keeping catalog order inside each bucket.
/// Every category has an entry, possibly empty.
pub fn commands_by_category<'a, I>(commands: I) -> BTreeMap<CommandCategory, Vec<&'a SlashCommand>>
where
    I: IntoIterator<Item = &'a SlashCommand>,
{
    let mut groups: BTreeMap<CommandCategory, Vec<&SlashCommand>> = CommandCategory::ALL
        .into_iter()
        .map(|category| (category, vec![]))
        .collect();
    for cmd in commands {
        groups.entry(cmd.category).or_default().push(cmd);
    }
    groups
}

fn matching<'a>(
    commands: impl Iterator<Item = &'a SlashCommand>,
    query: &str,
) -> Vec<&'a SlashCommand> {
    let query = query.trim();
    let query = query.strip_prefix('/').unwrap_or(query).to_lowercase();
    if query.is_empty() {
        return commands.collect();
    }
    let prefix = format!("/{query}");
    commands
        .filter(|cmd| cmd.haystack().contains(&query) || cmd.command.to_lowercase().starts_with(&prefix))
        .collect()
}
