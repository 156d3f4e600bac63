use std::ops::Range;

use super::{CommandAction, SlashCommand, matcher::CommandRegistry};

/// A `/token args` line split at the first whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The command token including its slash.
    pub token: &'a str,
    /// Everything after the token, trimmed.
    pub args: &'a str,
}

/// Parses a command invocation. The slash must be followed directly by an
/// alphanumeric character.
pub fn parse_invocation(input: &str) -> Option<Invocation<'_>> {
    let trimmed = input.trim_start();
    let rest = trimmed.strip_prefix('/')?;
    if !rest.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    Some(Invocation {
        token: &trimmed[..end],
        args: trimmed[end..].trim(),
    })
}

/// What an invocation turns into once its command is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Prompt to submit upstream; trailing arguments follow after a blank line.
    Prompt(String),
    /// Markdown to insert; trailing arguments follow the syntax.
    Insert(String),
}

/// Expands `input` when its first token names a known command.
///
/// Unknown tokens yield `None`; callers keep the literal text as typed.
pub fn expand_invocation(
    input: &str,
    registry: &CommandRegistry,
    user: &[SlashCommand],
) -> Option<Expansion> {
    let invocation = parse_invocation(input)?;
    let Some(cmd) = registry.find(invocation.token, Some(user)) else {
        log::debug!("no slash command for {}", invocation.token);
        return None;
    };

    let expansion = match &cmd.action {
        CommandAction::Prompt(prompt) if invocation.args.is_empty() => Expansion::Prompt(prompt.clone()),
        CommandAction::Prompt(prompt) => Expansion::Prompt(format!("{prompt}\n\n{}", invocation.args)),
        CommandAction::Insert { syntax } => Expansion::Insert(format!("{syntax}{}", invocation.args)),
    };
    Some(expansion)
}

/// The `/word` being typed immediately before the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashQuery {
    /// Byte range of the slash and the partial token.
    pub range: Range<usize>,
    /// Partial token without the slash; empty right after typing `/`.
    pub query: String,
}

/// Detects a slash command being typed at `caret`.
///
/// The slash must start the text or follow whitespace, so paths and URLs
/// never open the command menu.
pub fn active_query(text: &str, caret: usize) -> Option<SlashQuery> {
    let caret = caret.min(text.len());
    if !text.is_char_boundary(caret) {
        return None;
    }
    let before = &text[..caret];

    let (slash_idx, slash) = before
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_token_char(c))?;
    if slash != '/' {
        return None;
    }
    if before[..slash_idx]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace())
    {
        return None;
    }

    Some(SlashQuery {
        range: slash_idx..caret,
        query: before[slash_idx + 1..].to_string(),
    })
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
