use html_escape::{encode_double_quoted_attribute, encode_text};

use super::tree::{Block, DocumentTree, InlineNode};

/// Renders the tree as the HTML fragment an editable surface displays.
///
/// Blank lines become `<p><br></p>` so the host can place a caret in them.
pub fn render_html(tree: &DocumentTree) -> String {
    let mut out = String::new();
    for block in &tree.blocks {
        match block {
            Block::Paragraph(content) if content.is_empty() => out.push_str("<p><br></p>"),
            Block::Paragraph(content) => {
                out.push_str("<p>");
                write_inline(&mut out, content);
                out.push_str("</p>");
            }
            Block::Heading { level, content } => {
                let level = level.get();
                out.push_str(&format!("<h{level}>"));
                write_inline(&mut out, content);
                out.push_str(&format!("</h{level}>"));
            }
            Block::BulletList(items) | Block::OrderedList(items) => {
                let tag = if matches!(block, Block::BulletList(_)) {
                    "ul"
                } else {
                    "ol"
                };
                out.push_str(&format!("<{tag}>"));
                for item in items {
                    out.push_str("<li>");
                    write_inline(&mut out, &item.content);
                    out.push_str("</li>");
                }
                out.push_str(&format!("</{tag}>"));
            }
            Block::BlockQuote(lines) => {
                out.push_str("<blockquote>");
                for line in lines {
                    out.push_str("<p>");
                    write_inline(&mut out, line);
                    out.push_str("</p>");
                }
                out.push_str("</blockquote>");
            }
            Block::CodeBlock(code) => {
                let info = code.info();
                if info.is_empty() {
                    out.push_str("<pre><code>");
                } else {
                    out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        encode_double_quoted_attribute(info)
                    ));
                }
                out.push_str(&encode_text(&code.lines.join("\n")));
                out.push_str("</code></pre>");
            }
            Block::BlankLine => out.push_str("<p><br></p>"),
        }
    }
    out
}

fn write_inline(out: &mut String, nodes: &[InlineNode]) {
    for node in nodes {
        match node {
            InlineNode::Text(text) => out.push_str(&encode_text(text)),
            InlineNode::Bold(inner) => {
                out.push_str("<strong>");
                write_inline(out, inner);
                out.push_str("</strong>");
            }
            InlineNode::Italic(inner) => {
                out.push_str("<em>");
                write_inline(out, inner);
                out.push_str("</em>");
            }
            InlineNode::Code(code) => {
                out.push_str("<code>");
                out.push_str(&encode_text(code));
                out.push_str("</code>");
            }
            InlineNode::Link { text, url } if is_safe_url(url) => {
                out.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    encode_double_quoted_attribute(url),
                    encode_text(text)
                ));
            }
            InlineNode::Link { text, .. } => out.push_str(&encode_text(text)),
            InlineNode::LineBreak => out.push_str("<br>"),
        }
    }
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::markdown_to_structure;

    fn html(md: &str) -> String {
        render_html(&markdown_to_structure(md))
    }

    #[test]
    fn renders_blocks() {
        insta::assert_snapshot!(
            html("# Hi\n- a\n- **b**\n\n> q"),
            @"<h1>Hi</h1><ul><li>a</li><li><strong>b</strong></li></ul><p><br></p><blockquote><p>q</p></blockquote>"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        insta::assert_snapshot!(
            html("1. <b>&</b> [x](https://a.io/?q=\"1\")"),
            @r#"<ol><li>&lt;b&gt;&amp;&lt;/b&gt; <a href="https://a.io/?q=&quot;1&quot;">x</a></li></ol>"#
        );
    }

    #[test]
    fn code_block_with_language() {
        insta::assert_snapshot!(
            html("```html\n<p>\n```"),
            @r#"<pre><code class="language-html">&lt;p&gt;</code></pre>"#
        );
    }

    #[test]
    fn unsafe_link_renders_as_text() {
        assert_eq!(html("[x](javascript:alert)"), "<p>x</p>");
    }
}
