use super::{
    blocks::kinds::{BlockQuote, BulletItem, Continuation, Heading, NumberedItem},
    inline::kinds::{Emphasis, Strong},
    tree::{Block, DocumentTree, InlineNode},
};

/// Serializes a document tree to canonical markdown.
///
/// Bullets always use `- `; ordered lists renumber from 1. Blocks are
/// `\n`-separated and blank lines are explicit `BlankLine` blocks, so no
/// separators are invented.
pub fn structure_to_markdown(tree: &DocumentTree) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(tree.blocks.len());

    for block in &tree.blocks {
        match block {
            Block::Paragraph(content) => lines.push(inline_to_markdown(content, "\n")),
            Block::Heading { level, content } => {
                lines.push(Heading::prefix(*level) + &inline_to_markdown(content, " "));
            }
            Block::BulletList(items) => {
                let brk = format!("\n{}", Continuation::INDENT);
                for item in items {
                    lines.push(format!(
                        "{}{}",
                        BulletItem::CANONICAL,
                        inline_to_markdown(&item.content, &brk)
                    ));
                }
            }
            Block::OrderedList(items) => {
                let brk = format!("\n{}", Continuation::INDENT);
                for (i, item) in items.iter().enumerate() {
                    lines.push(format!(
                        "{}{}",
                        NumberedItem::prefix(i + 1),
                        inline_to_markdown(&item.content, &brk)
                    ));
                }
            }
            Block::BlockQuote(quote_lines) => {
                let brk = format!("\n{}", BlockQuote::PREFIX);
                for line in quote_lines {
                    lines.push(format!(
                        "{}{}",
                        BlockQuote::PREFIX,
                        inline_to_markdown(line, &brk)
                    ));
                }
            }
            Block::CodeBlock(code) => {
                lines.push(code.opener.clone());
                lines.extend(code.lines.iter().cloned());
                if let Some(closer) = &code.closer {
                    lines.push(closer.clone());
                }
            }
            Block::BlankLine => lines.push(String::new()),
        }
    }

    lines.join("\n")
}

/// Serializes inline runs; `line_break` is what a soft break becomes in
/// the enclosing block.
pub fn inline_to_markdown(nodes: &[InlineNode], line_break: &str) -> String {
    let mut out = String::new();
    write_inline(&mut out, nodes, line_break);
    out
}

fn write_inline(out: &mut String, nodes: &[InlineNode], line_break: &str) {
    for node in nodes {
        match node {
            InlineNode::Text(text) => out.push_str(text),
            InlineNode::Bold(inner) => {
                out.push_str(Strong::CANONICAL);
                write_inline(out, inner, line_break);
                out.push_str(Strong::CANONICAL);
            }
            InlineNode::Italic(inner) => {
                out.push_str(Emphasis::CANONICAL);
                write_inline(out, inner, line_break);
                out.push_str(Emphasis::CANONICAL);
            }
            InlineNode::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            InlineNode::Link { text, url } => {
                out.push('[');
                out.push_str(text);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
            InlineNode::LineBreak => out.push_str(line_break),
        }
    }
}
