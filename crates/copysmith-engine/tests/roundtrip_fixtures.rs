use copysmith_engine::editing::Editor;
use copysmith_engine::markdown::{Block, markdown_to_structure, normalize_markdown, render_html};
use pretty_assertions::assert_eq;

#[test]
fn fixture_campaign_draft() {
    assert_fixture("campaign_draft");
}

#[test]
fn fixture_unterminated_fence() {
    assert_fixture("unterminated_fence");
}

fn read_fixture(file: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{file}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn assert_fixture(name: &str) {
    let md = read_fixture(&format!("{name}.md"));
    let expected = read_fixture(&format!("{name}.canonical.md"));

    assert_eq!(normalize_markdown(&md), expected, "normalizing {name}");
    assert_eq!(normalize_markdown(&expected), expected, "{name} is not stable");
    assert_eq!(Editor::new(&md).text(), expected);
}

#[test]
fn campaign_draft_structure() {
    let tree = markdown_to_structure(&read_fixture("campaign_draft.md"));
    let kinds: Vec<&str> = tree
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(_) => "paragraph",
            Block::Heading { .. } => "heading",
            Block::BulletList(_) => "bullets",
            Block::OrderedList(_) => "ordered",
            Block::BlockQuote(_) => "quote",
            Block::CodeBlock(_) => "code",
            Block::BlankLine => "blank",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "blank",
            "bullets",
            "blank",
            "ordered",
            "blank",
            "quote",
            "blank",
            "code",
            "blank",
            "paragraph",
            "paragraph",
            "blank",
        ]
    );
}

#[test]
fn campaign_draft_html() {
    let html = render_html(&markdown_to_structure(&read_fixture("campaign_draft.md")));
    assert!(html.starts_with("<h1>Spring Sale</h1>"));
    assert!(html.contains("<li>Pick <strong>your</strong> favourite</li>"));
    assert!(html.contains("<em>shirt</em>"));
    assert!(html.contains("* not a list"));
    assert!(html.contains(r#"<a href="https://example.com/look">the lookbook</a>"#));
}
