//! Converter tests over whole documents.


use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{
    Block, InlineNode, markdown_to_structure, normalize_markdown, structure_to_markdown,
};

fn roundtrip(md: &str) -> String {
    let tree = markdown_to_structure(md);
    invariants::check(&tree);
    structure_to_markdown(&tree)
}

#[rstest]
#[case::paragraph("hello world")]
#[case::headings("# One\n## Two\n### Three")]
#[case::bullets("- a\n- b")]
#[case::numbered("1. a\n2. b\n3. c")]
#[case::quote("> a\n> b")]
#[case::inline("**bold** and *italic* and `code` and [link](https://x.io)")]
#[case::fence("```js\nconst a = 1;\n\n- x\n```")]
#[case::blank_lines("a\n\n\nb\n")]
#[case::continuation("- first\n  second line\n- next")]
#[case::trailing_space_while_typing("- ")]
#[case::empty_heading("# ")]
fn canonical_input_is_unchanged(#[case] md: &str) {
    assert_eq!(roundtrip(md), md);
}

#[rstest]
#[case::table("| a | b |\n|---|---|")]
#[case::nested_list("- a\n    - nested deeper")]
#[case::image("![logo](logo.png)")]
#[case::titled_link("[t](https://x.io \"title\")")]
#[case::deep_heading("#### four")]
#[case::unclosed("**open and `tick")]
#[case::html("<div>raw</div>")]
fn unsupported_constructs_pass_through(#[case] md: &str) {
    assert_eq!(roundtrip(md), md);
}

#[rstest]
#[case("3. foo\n7. bar", "1. foo\n2. bar")]
#[case("* a\n* b", "- a\n- b")]
#[case("__strong__ _em_", "**strong** *em*")]
#[case("a\r\nb", "a\nb")]
fn normalizes_to_canonical_form(#[case] md: &str, #[case] expected: &str) {
    assert_eq!(normalize_markdown(md), expected);
}

#[rstest]
#[case("3. foo\n7. bar")]
#[case("* x __y__ _z_\n\n> **q**")]
#[case("_a*_ and __b__c")]
#[case("***triple*** **a *b* c**")]
#[case("- a\n  - b\n1. c\n\n```\nx")]
#[case("_sale ends __today___")]
#[case("- _a __b___ and **big *deal***")]
fn normalization_is_idempotent(#[case] md: &str) {
    let once = normalize_markdown(md);
    let twice = normalize_markdown(&once);
    assert_eq!(twice, once);
}

/// Building blocks for generated documents: every inline delimiter, every
/// line-start marker, a link, multibyte text and line breaks.
const TOKENS: &[&str] = &[
    "*", "**", "_", "__", "`", "- ", "1. ", "> ", "# ", "a", "b c", "é", "[x](y)", "\n",
];

/// Linear congruential step; keeps the generated corpus deterministic.
fn next_index(state: &mut u64, bound: usize) -> usize {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((*state >> 33) as usize) % bound
}

fn assert_stable(md: &str) {
    let first = markdown_to_structure(md);
    invariants::check(&first);
    let once = structure_to_markdown(&first);

    let second = markdown_to_structure(&once);
    invariants::check(&second);
    assert_eq!(structure_to_markdown(&second), once, "input {md:?}");
}

#[test]
fn generated_documents_normalize_idempotently() {
    // Every token sequence up to four long.
    let mut frontier = vec![String::new()];
    for _ in 0..4 {
        frontier = frontier
            .iter()
            .flat_map(|prefix| TOKENS.iter().map(move |t| format!("{prefix}{t}")))
            .collect();
        for md in &frontier {
            assert_stable(md);
        }
    }

    // Longer pseudo-random sequences.
    let mut state = 0x00c0_ffee;
    for _ in 0..2000 {
        let len = 5 + next_index(&mut state, 6);
        let md: String = (0..len)
            .map(|_| TOKENS[next_index(&mut state, TOKENS.len())])
            .collect();
        assert_stable(&md);
    }
}

#[test]
fn list_then_paragraph() {
    let tree = markdown_to_structure("- first\n- second\nthird");
    assert_eq!(tree.blocks.len(), 2);
    match &tree.blocks[0] {
        Block::BulletList(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(
                items[1].content,
                vec![InlineNode::Text("second".to_string())]
            );
        }
        other => panic!("expected bullet list, got {other:?}"),
    }
    assert_eq!(
        tree.blocks[1],
        Block::Paragraph(vec![InlineNode::Text("third".to_string())])
    );
    assert_eq!(structure_to_markdown(&tree), "- first\n- second\nthird");
}

#[test]
fn differently_typed_line_closes_list() {
    let tree = markdown_to_structure("- a\n1. b\n> c");
    assert!(matches!(tree.blocks[0], Block::BulletList(_)));
    assert!(matches!(tree.blocks[1], Block::OrderedList(_)));
    assert!(matches!(tree.blocks[2], Block::BlockQuote(_)));
}

#[test]
fn empty_document_has_no_blocks() {
    assert!(markdown_to_structure("").is_empty());
    assert_eq!(normalize_markdown(""), "");
}

#[test]
fn blank_lines_are_kept() {
    let tree = markdown_to_structure("\n\n");
    assert_eq!(tree.blocks, vec![Block::BlankLine; 3]);
    assert_eq!(structure_to_markdown(&tree), "\n\n");
}

#[test]
fn conversion_is_deterministic() {
    let md = "## Launch\n- **Save** 20%\n- Ends *Friday*";
    assert_eq!(markdown_to_structure(md), markdown_to_structure(md));
}
