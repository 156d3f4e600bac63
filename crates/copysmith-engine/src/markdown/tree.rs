/// Inline run inside a block's single content span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Literal text, including any markup that did not match a construct.
    Text(String),
    /// `**x**` or `__x__`.
    Bold(Vec<InlineNode>),
    /// `*x*` or `_x_`.
    Italic(Vec<InlineNode>),
    /// `` `x` ``. Raw zone: nothing is parsed inside.
    Code(String),
    /// `[text](url)`.
    Link { text: String, url: String },
    /// Soft line break inside one block (Shift+Enter).
    LineBreak,
}

/// Heading depth. Only levels 1 to 3 are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// One item of a bullet or ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<InlineNode>,
}

/// A verbatim fenced code block.
///
/// The opener and closer lines are kept as typed so the block serializes
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub opener: String,
    pub lines: Vec<String>,
    /// `None` while the fence is still open (unterminated at end of text).
    pub closer: Option<String>,
}

impl CodeBlock {
    /// Info string after the fence characters, e.g. `rust` for ```` ```rust ````.
    pub fn info(&self) -> &str {
        self.opener
            .trim_start()
            .trim_start_matches(['`', '~'])
            .trim()
    }

    pub fn is_closed(&self) -> bool {
        self.closer.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<InlineNode>),
    Heading {
        level: HeadingLevel,
        content: Vec<InlineNode>,
    },
    BulletList(Vec<ListItem>),
    OrderedList(Vec<ListItem>),
    /// One inline span per `> ` line.
    BlockQuote(Vec<Vec<InlineNode>>),
    CodeBlock(CodeBlock),
    /// An empty line separating blocks.
    BlankLine,
}

/// The structural form of an editable document.
///
/// Rebuilt from markdown on every edit; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenated visible text of all inline runs, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(content) | Block::Heading { content, .. } => {
                    out.push(inline_text(content));
                }
                Block::BulletList(items) | Block::OrderedList(items) => {
                    out.extend(items.iter().map(|item| inline_text(&item.content)));
                }
                Block::BlockQuote(lines) => {
                    out.extend(lines.iter().map(|line| inline_text(line)));
                }
                Block::CodeBlock(code) => out.extend(code.lines.iter().cloned()),
                Block::BlankLine => out.push(String::new()),
            }
        }
        out.join("\n")
    }
}

fn inline_text(nodes: &[InlineNode]) -> String {
    let mut s = String::new();
    for node in nodes {
        match node {
            InlineNode::Text(t) | InlineNode::Code(t) => s.push_str(t),
            InlineNode::Bold(inner) | InlineNode::Italic(inner) => s.push_str(&inline_text(inner)),
            InlineNode::Link { text, .. } => s.push_str(text),
            InlineNode::LineBreak => s.push('\n'),
        }
    }
    s
}
