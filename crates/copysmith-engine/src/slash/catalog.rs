use std::sync::LazyLock;

use super::{CommandCategory, SlashCommand};

/// Built-in commands in display order.
pub static BUILTIN_COMMANDS: LazyLock<Vec<SlashCommand>> = LazyLock::new(builtin_commands);

fn builtin_commands() -> Vec<SlashCommand> {
    use CommandCategory::{Refine, Structure, Tone};

    vec![
        // Formatting
        SlashCommand::formatting("h1", "/h1", "Heading 1", "Large section heading", "# ")
            .with_shortcut("Ctrl+Alt+1"),
        SlashCommand::formatting("h2", "/h2", "Heading 2", "Medium section heading", "## ")
            .with_shortcut("Ctrl+Alt+2"),
        SlashCommand::formatting("h3", "/h3", "Heading 3", "Small section heading", "### ")
            .with_shortcut("Ctrl+Alt+3"),
        SlashCommand::formatting("bullet", "/bullet", "Bulleted list", "Start a bulleted list", "- "),
        SlashCommand::formatting("numbered", "/numbered", "Numbered list", "Start a numbered list", "1. "),
        SlashCommand::formatting("quote", "/quote", "Quote", "Insert a blockquote", "> "),
        SlashCommand::formatting("bold", "/bold", "Bold", "Bold text", "**bold text**")
            .with_shortcut("Ctrl+B"),
        SlashCommand::formatting("italic", "/italic", "Italic", "Italic text", "*italic text*")
            .with_shortcut("Ctrl+I"),
        SlashCommand::formatting("code", "/code", "Code block", "Insert a fenced code block", "```\n\n```"),
        // Refine
        SlashCommand::action(
            "shorten",
            "/shorten",
            "Shorten",
            "Make the email more concise",
            Refine,
            "Make this email shorter and punchier. Cut filler, keep the core message and the CTA.",
        ),
        SlashCommand::action(
            "expand",
            "/expand",
            "Expand",
            "Add detail and supporting copy",
            Refine,
            "Expand this email with more detail, supporting benefits and a stronger narrative.",
        ),
        SlashCommand::action(
            "cta",
            "/cta",
            "Improve CTAs",
            "Sharper calls to action",
            Refine,
            "Rewrite the CTAs to be more compelling and action-oriented. Keep them short and specific.",
        ),
        SlashCommand::action(
            "subject",
            "/subject",
            "Subject lines",
            "Suggest subject line alternatives",
            Refine,
            "Write 5 alternative subject lines for this email, each under 50 characters, with a matching preview text.",
        ),
        SlashCommand::action(
            "proofread",
            "/proofread",
            "Proofread",
            "Fix grammar and spelling",
            Refine,
            "Proofread this email. Fix grammar, spelling and punctuation without changing the voice.",
        ),
        SlashCommand::action(
            "simplify",
            "/simplify",
            "Simplify",
            "Plainer language",
            Refine,
            "Rewrite this email in plain, simple language at an 8th-grade reading level.",
        ),
        // Tone
        SlashCommand::action(
            "casual",
            "/casual",
            "Casual",
            "Relaxed, conversational tone",
            Tone,
            "Rewrite this email in a casual, conversational tone, like a note from a friend.",
        ),
        SlashCommand::action(
            "professional",
            "/professional",
            "Professional",
            "Polished, businesslike tone",
            Tone,
            "Rewrite this email in a polished, professional tone.",
        ),
        SlashCommand::action(
            "urgent",
            "/urgent",
            "Urgent",
            "Add urgency and scarcity",
            Tone,
            "Rewrite this email to create urgency: highlight deadlines, limited stock and what the reader misses out on.",
        ),
        SlashCommand::action(
            "playful",
            "/playful",
            "Playful",
            "Light, witty tone",
            Tone,
            "Rewrite this email with a playful, witty tone while keeping the offer clear.",
        ),
        // Structure
        SlashCommand::action(
            "versions",
            "/versions",
            "A/B/C versions",
            "Three alternative drafts",
            Structure,
            "Write three distinct versions of this email (A, B and C), each with a different strategy. Start each version with its strategy.",
        ),
        SlashCommand::action(
            "sections",
            "/sections",
            "Structured sections",
            "Lay out as hero, text and CTA blocks",
            Structure,
            "Rewrite this email as structured sections ([HERO], [TEXT], [BULLETS], [CTA]) with headline, body and CTA fields.",
        ),
        SlashCommand::action(
            "preheader",
            "/preheader",
            "Preview text",
            "Write the inbox preview text",
            Structure,
            "Write 3 options for the preview text that complements the subject line.",
        ),
        SlashCommand::action(
            "flow",
            "/flow",
            "Plan a flow",
            "Propose a multi-email automation",
            Structure,
            "Propose an email flow for this campaign: list each email with its timing, type, key points and CTA, then ask me to confirm.",
        ),
    ]
}
