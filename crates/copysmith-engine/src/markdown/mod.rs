//! # Markdown ⇄ Structure Conversion
//!
//! Pure, host-agnostic conversion between canonical markdown and the
//! `DocumentTree` an editor manipulates.
//!
//! Supported subset: headings 1-3, single-level bullet and numbered lists,
//! bold, italic, inline code, links, blockquotes, fenced code blocks and
//! paragraph breaks. Everything else (tables, nested lists, images,
//! titled links) passes through as literal text.
//!
//! ## Guarantees
//!
//! - Lossless: every input character reaches the output, either as a
//!   structural container or as text. `\r\n` normalizes to `\n`.
//! - Idempotent: `normalize_markdown(normalize_markdown(s)) == normalize_markdown(s)`.
//! - Normalizing: bullets become `- `, ordered lists renumber from 1,
//!   `__x__`/`_x_` become `**x**`/`*x*`.

pub mod blocks;
pub mod html;
pub mod inline;
pub mod serialize;
pub mod tree;

#[cfg(test)]
mod tests;

pub use html::render_html;
pub use serialize::structure_to_markdown;
pub use tree::{Block, CodeBlock, DocumentTree, HeadingLevel, InlineNode, ListItem};

use blocks::BlockBuilder;

/// Builds the structural tree for `markdown`, one line at a time.
pub fn markdown_to_structure(markdown: &str) -> DocumentTree {
    if markdown.is_empty() {
        return DocumentTree::default();
    }

    let mut builder = BlockBuilder::new();
    for line in markdown.split('\n') {
        builder.push(line.strip_suffix('\r').unwrap_or(line));
    }

    DocumentTree {
        blocks: builder.finish(),
    }
}

/// Round-trips `markdown` through the tree, yielding its canonical form.
pub fn normalize_markdown(markdown: &str) -> String {
    let canonical = structure_to_markdown(&markdown_to_structure(markdown));
    if canonical != markdown {
        log::trace!(
            "normalized markdown ({} -> {} bytes)",
            markdown.len(),
            canonical.len()
        );
    }
    canonical
}
