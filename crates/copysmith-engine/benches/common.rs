// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Spring Sale\n\n## This weekend\n\nParagraph with **bold**, *italic* and `code`.\n\n* Free shipping\n  on every order\n* Easy returns\n\n3. Browse\n7. Buy\n\n> Best shirt I own.\n\n```text\nraw *stuff*\n```\n\n[Shop now](https://example.com)\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_versioned_message(size: usize) -> String {
    let mut content = String::from("Here are three takes:\n");
    for id in ["A", "B", "C"] {
        content.push_str(&format!("[VERSION_{id}]\nStrategy: angle {id}\n"));
        content.push_str(&"Subject: Hello\nBody line with some words.\n".repeat(size));
        content.push_str(&format!("[END_VERSION_{id}]\n"));
    }
    content.push_str("Let me know which one you like.");
    content
}

#[allow(dead_code)]
pub fn generate_structured_email(sections: usize) -> String {
    let mut content = String::from("Subject: Big news\nPreview: Open me\nApproach: Warm and direct.\n\n");
    for i in 0..sections {
        content.push_str(&format!(
            "[HERO]\nHeadline: Section {i}\nSubhead: More\nCTA: Go\n\n[BULLETS]\n- One\n- Two\n\n[PRODUCT GRID]\n- Tote | Carries things | $25\n\n"
        ));
    }
    content.push_str("Design Notes:\nKeep it light.");
    content
}

#[allow(dead_code)]
pub fn generate_flow_message(tasks: usize) -> String {
    let mut content = String::from("Here's a plan.\n[FLOW_PLAN]\nName: Welcome\nGoal: Convert\n");
    for i in 1..=tasks {
        content.push_str(&format!(
            "{i}. Email {i}\nTiming: Day {i}\nType: Nurture\nKey points:\n- Point one\n- Point two\nCTA: Shop\n"
        ));
    }
    content.push_str("[/FLOW_PLAN]\n[CONFIRM]\nLooks good?\n[/CONFIRM]");
    content
}
