use crate::markdown::{
    inline::parse_inline,
    tree::{Block, CodeBlock, InlineNode, ListItem},
};

use super::{
    classify::{LineClass, classify},
    kinds::{CodeFence, FenceKind},
};

/// The group currently accepting lines.
#[derive(Debug)]
enum OpenGroup {
    None,
    Bullet(Vec<ListItem>),
    Ordered(Vec<ListItem>),
    Quote(Vec<Vec<InlineNode>>),
    Fence { kind: FenceKind, code: CodeBlock },
}

/// Groups classified lines into blocks.
///
/// Consecutive list lines of the same kind share a list node, consecutive
/// quote lines share a blockquote. Anything else closes the open group.
pub struct BlockBuilder {
    open: OpenGroup,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            open: OpenGroup::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &str) {
        if let OpenGroup::Fence { kind, code } = &mut self.open {
            if CodeFence::closes(*kind, line) {
                code.closer = Some(line.to_string());
                self.flush();
            } else {
                code.lines.push(line.to_string());
            }
            return;
        }

        match classify(line) {
            LineClass::Fence(kind) => {
                self.flush();
                self.open = OpenGroup::Fence {
                    kind,
                    code: CodeBlock {
                        opener: line.to_string(),
                        lines: vec![],
                        closer: None,
                    },
                };
            }
            LineClass::Heading { level, text } => {
                self.flush();
                self.out.push(Block::Heading {
                    level,
                    content: parse_inline(text),
                });
            }
            LineClass::Quote(text) => {
                if !matches!(self.open, OpenGroup::Quote(_)) {
                    self.flush();
                    self.open = OpenGroup::Quote(vec![]);
                }
                if let OpenGroup::Quote(lines) = &mut self.open {
                    lines.push(parse_inline(text));
                }
            }
            LineClass::Bullet(text) => {
                if !matches!(self.open, OpenGroup::Bullet(_)) {
                    self.flush();
                    self.open = OpenGroup::Bullet(vec![]);
                }
                if let OpenGroup::Bullet(items) = &mut self.open {
                    items.push(list_item(text));
                }
            }
            LineClass::Numbered { text, .. } => {
                if !matches!(self.open, OpenGroup::Ordered(_)) {
                    self.flush();
                    self.open = OpenGroup::Ordered(vec![]);
                }
                if let OpenGroup::Ordered(items) = &mut self.open {
                    items.push(list_item(text));
                }
            }
            LineClass::Indented { text } => {
                if let OpenGroup::Bullet(items) | OpenGroup::Ordered(items) = &mut self.open
                    && let Some(last) = items.last_mut()
                {
                    last.content.push(InlineNode::LineBreak);
                    last.content.extend(parse_inline(text));
                } else {
                    self.flush();
                    self.out.push(Block::Paragraph(parse_inline(line)));
                }
            }
            LineClass::Blank => {
                self.flush();
                self.out.push(Block::BlankLine);
            }
            LineClass::Text(text) => {
                self.flush();
                self.out.push(Block::Paragraph(parse_inline(text)));
            }
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush; an unterminated fence is emitted without a closer.
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        let block = match std::mem::replace(&mut self.open, OpenGroup::None) {
            OpenGroup::None => return,
            OpenGroup::Bullet(items) => Block::BulletList(items),
            OpenGroup::Ordered(items) => Block::OrderedList(items),
            OpenGroup::Quote(lines) => Block::BlockQuote(lines),
            OpenGroup::Fence { code, .. } => Block::CodeBlock(code),
        };
        self.out.push(block);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn list_item(text: &str) -> ListItem {
    ListItem {
        content: parse_inline(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> Vec<Block> {
        let mut builder = BlockBuilder::new();
        for line in lines {
            builder.push(line);
        }
        builder.finish()
    }

    #[test]
    fn groups_same_kind_list_lines() {
        let blocks = build(&["- a", "* b", "1. c"]);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::BulletList(items) if items.len() == 2));
        assert!(matches!(&blocks[1], Block::OrderedList(items) if items.len() == 1));
    }

    #[test]
    fn blank_line_closes_list() {
        let blocks = build(&["- a", "", "- b"]);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::BlankLine));
    }

    #[test]
    fn indented_line_continues_item() {
        let blocks = build(&["- a", "  more"]);
        let Block::BulletList(items) = &blocks[0] else {
            panic!("expected bullet list");
        };
        assert_eq!(
            items[0].content,
            vec![
                InlineNode::Text("a".to_string()),
                InlineNode::LineBreak,
                InlineNode::Text("more".to_string()),
            ]
        );
    }

    #[test]
    fn indented_line_without_list_is_paragraph() {
        let blocks = build(&["  lonely"]);
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![InlineNode::Text(
                "  lonely".to_string()
            )])]
        );
    }

    #[test]
    fn fence_is_raw_zone() {
        let blocks = build(&["```", "- not a list", "```"]);
        let Block::CodeBlock(code) = &blocks[0] else {
            panic!("expected code block");
        };
        assert_eq!(code.lines, vec!["- not a list".to_string()]);
        assert!(code.is_closed());
    }

    #[test]
    fn unterminated_fence_stays_open() {
        let blocks = build(&["~~~", "code"]);
        assert!(matches!(&blocks[0], Block::CodeBlock(code) if !code.is_closed()));
    }

    #[test]
    fn consecutive_quote_lines_group() {
        let blocks = build(&["> a", "> b", "c"]);
        assert!(matches!(&blocks[0], Block::BlockQuote(lines) if lines.len() == 2));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
    }
}
