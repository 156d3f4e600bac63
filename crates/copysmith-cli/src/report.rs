//! Plain-text rendering of parsed assistant messages for the terminal.

use copysmith_engine::MessageView;
use copysmith_engine::content::{
    EmailSection, FlowContent, FlowSegment, FlowTask, ParsedEmail, ParsedVersions,
};
use copysmith_engine::slash::{CommandCategory, SlashCommand, commands_by_category};
use std::fmt::Write;

pub fn render_view(view: &MessageView) -> String {
    let mut out = String::new();
    match view {
        MessageView::Versions(parsed) => render_versions(&mut out, parsed),
        MessageView::Flow(flow) => render_flow(&mut out, flow),
        MessageView::Email(email) => render_email(&mut out, email),
        MessageView::Plain(text) => {
            out.push_str("plain\n");
            push_indented(&mut out, text, 1);
        }
    }
    out
}

fn render_versions(out: &mut String, parsed: &ParsedVersions) {
    out.push_str("versions\n");
    if !parsed.before_content.is_empty() {
        push_field(out, 1, "before", &parsed.before_content);
    }
    for version in &parsed.versions {
        let active = parsed.active_version.as_deref() == Some(version.id.as_str());
        let _ = writeln!(
            out,
            "  {}{}{}",
            version.label,
            if active { " (active)" } else { "" },
            if version.is_partial { " [writing]" } else { "" },
        );
        if let Some(strategy) = &version.strategy {
            push_field(out, 2, "strategy", strategy);
        }
        push_indented(out, &version.content, 2);
    }
    for prose in &parsed.between_content {
        push_field(out, 1, "between", prose);
    }
    if !parsed.after_content.is_empty() {
        push_field(out, 1, "after", &parsed.after_content);
    }
}

fn render_flow(out: &mut String, flow: &FlowContent) {
    out.push_str("flow\n");
    for (index, segment) in flow.segments.iter().enumerate() {
        match segment {
            FlowSegment::Text(text) => {
                out.push_str("  text\n");
                push_indented(out, text, 2);
            }
            FlowSegment::Suggestions(chips) => {
                out.push_str("  suggestions\n");
                for chip in chips {
                    let _ = writeln!(out, "    - {chip}");
                }
            }
            FlowSegment::Plan(plan) => {
                out.push_str("  plan\n");
                if let Some(name) = &plan.name {
                    push_field(out, 2, "name", name);
                }
                if let Some(goal) = &plan.goal {
                    push_field(out, 2, "goal", goal);
                }
                if let Some(description) = &plan.description {
                    push_field(out, 2, "description", description);
                }
                for (n, task) in plan.tasks.iter().enumerate() {
                    render_task(out, n + 1, task);
                }
            }
            FlowSegment::Confirm(confirm) => {
                out.push_str("  confirm\n");
                push_field(out, 2, "message", &confirm.message);
                if let Some(plan) = flow.plan_for(index) {
                    let name = plan.name.as_deref().unwrap_or("unnamed plan");
                    push_field(out, 2, "plan", name);
                }
            }
        }
    }
}

fn render_task(out: &mut String, n: usize, task: &FlowTask) {
    let _ = writeln!(out, "    {n}. {}", task.title);
    if let Some(timing) = &task.timing {
        push_field(out, 3, "timing", timing);
    }
    if let Some(email_type) = &task.email_type {
        push_field(out, 3, "type", email_type);
    }
    for point in &task.key_points {
        let _ = writeln!(out, "      * {point}");
    }
    if let Some(cta) = &task.cta {
        push_field(out, 3, "cta", cta);
    }
    for extra in &task.extra {
        push_field(out, 3, &extra.label.to_lowercase(), &extra.value);
    }
}

fn render_email(out: &mut String, email: &ParsedEmail) {
    out.push_str("email\n");
    for (label, value) in [
        ("subject", &email.subject),
        ("preview", &email.preview),
        ("approach", &email.approach),
        ("intro", &email.intro),
    ] {
        if let Some(value) = value {
            push_field(out, 1, label, value);
        }
    }
    for section in &email.sections {
        render_section(out, section);
    }
    if let Some(notes) = &email.design_notes {
        push_field(out, 1, "design notes", notes);
    }
}

fn render_section(out: &mut String, section: &EmailSection) {
    let _ = writeln!(out, "  [{}] {:?}", section.label, section.kind);
    for (label, value) in [
        ("headline", &section.headline),
        ("subhead", &section.subhead),
        ("body", &section.body),
    ] {
        if let Some(value) = value {
            push_field(out, 2, label, value);
        }
    }
    for bullet in &section.bullets {
        let _ = writeln!(out, "    * {bullet}");
    }
    for product in &section.products {
        let mut line = product.name.clone();
        if let Some(description) = &product.description {
            let _ = write!(line, " | {description}");
        }
        if let Some(price) = &product.price {
            let _ = write!(line, " | {price}");
        }
        push_field(out, 2, "product", &line);
    }
    if let Some(cta) = &section.cta {
        push_field(out, 2, "cta", cta);
    }
    for extra in &section.extra {
        push_field(out, 2, &extra.label.to_lowercase(), &extra.value);
    }
}

/// Lists commands grouped by category, skipping empty groups.
pub fn render_commands<'a, I>(commands: I) -> String
where
    I: IntoIterator<Item = &'a SlashCommand>,
{
    let mut out = String::new();
    for (category, cmds) in commands_by_category(commands) {
        if cmds.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", category_heading(category));
        for cmd in cmds {
            let _ = write!(out, "  {:<14} {}", cmd.command, cmd.label);
            if let Some(shortcut) = &cmd.shortcut {
                let _ = write!(out, " ({shortcut})");
            }
            let _ = writeln!(out, " - {}", cmd.description);
        }
    }
    out
}

fn category_heading(category: CommandCategory) -> String {
    format!("{}:", category.label())
}

fn push_field(out: &mut String, depth: usize, label: &str, value: &str) {
    let pad = "  ".repeat(depth);
    let mut lines = value.lines();
    let _ = writeln!(out, "{pad}{label}: {}", lines.next().unwrap_or_default());
    for line in lines {
        let _ = writeln!(out, "{pad}  {line}");
    }
}

fn push_indented(out: &mut String, text: &str, depth: usize) {
    let pad = "  ".repeat(depth);
    for line in text.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{pad}{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copysmith_engine::classify_message;
    use copysmith_engine::content::CompiledMarkers;
    use pretty_assertions::assert_eq;

    fn render(text: &str, streaming: bool) -> String {
        render_view(&classify_message(text, &CompiledMarkers::default(), streaming))
    }

    #[test]
    fn test_render_streaming_versions() {
        let out = render(
            "Two takes:\n[VERSION_A]\nStrategy: urgency\nLast chance\n[END_VERSION_A]\n[VERSION_B]\nHello fr",
            true,
        );
        assert_eq!(
            out,
            "versions\n  before: Two takes:\n  Version A\n    strategy: urgency\n    Last chance\n  \
             Version B (active) [writing]\n    Hello fr\n"
        );
    }

    #[test]
    fn test_render_prose_between_versions() {
        let out = render(
            "[VERSION_A]\nOne\n[END_VERSION_A]\nOr warmer:\n[VERSION_B]\nTwo\n[END_VERSION_B]\nPick one.",
            false,
        );
        assert_eq!(
            out,
            "versions\n  Version A (active)\n    One\n  Version B\n    Two\n  between: Or warmer:\n  \
             after: Pick one.\n"
        );
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(render("Hi\n\nthere", false), "plain\n  Hi\n\n  there\n");
    }

    #[test]
    fn test_render_suggestions() {
        let out = render("Pick one\n[SUGGESTIONS]\n- Shorter\n- Warmer\n[/SUGGESTIONS]", false);
        assert_eq!(
            out,
            "flow\n  text\n    Pick one\n  suggestions\n    - Shorter\n    - Warmer\n"
        );
    }

    #[test]
    fn test_render_commands_groups_and_skips_empty() {
        let user = vec![
            SlashCommand::action(
                "custom-brand",
                "/brand",
                "Brand voice",
                "House style",
                CommandCategory::Custom,
                "Use the brand voice",
            )
            .with_shortcut("Ctrl+B"),
        ];
        let out = render_commands(user.iter());
        assert_eq!(
            out,
            "My shortcuts:\n  /brand         Brand voice (Ctrl+B) - House style\n"
        );
    }
}
