//! Structured email copy: bracketed section labels (`[HERO]`, `[TEXT]`,
//! `[CTA]`, ...) each followed by `Label: value` lines.

use std::sync::LazyLock;

use regex::Regex;

/// A line holding nothing but a bracketed label.
static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(?P<label>[A-Za-z][A-Za-z0-9 _&/-]*)\]\s*$").expect("valid section regex")
});

/// `Label: value`, with optional bold around the label.
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:\*\*)?(?P<label>[A-Za-z][A-Za-z0-9 ()&/'-]{0,40}?)\s*(?:\*\*)?:(?:\*\*)?\s*(?P<value>.*?)\s*$",
    )
    .expect("valid field regex")
});

const BULLET_PREFIXES: [&str; 3] = ["- ", "* ", "• "];
const PRODUCT_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Text,
    Bullets,
    ProductGrid,
    CtaBlock,
    SocialProof,
    Testimonial,
    /// Any other bracketed label.
    Generic,
}

impl SectionKind {
    /// Maps a bracket label to a recognized kind, tolerating case and
    /// `_`/`-`/space spelling differences.
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "HERO" | "HEADER" | "HERO SECTION" => Self::Hero,
            "TEXT" | "BODY" | "TEXT BLOCK" | "BODY COPY" => Self::Text,
            "BULLETS" | "BULLET LIST" | "LIST" | "FEATURES" => Self::Bullets,
            "PRODUCT GRID" | "PRODUCTS" | "PRODUCT" => Self::ProductGrid,
            "CTA" | "CTA BLOCK" | "CTA BUTTON" | "BUTTON" => Self::CtaBlock,
            "SOCIAL PROOF" | "REVIEWS" | "STATS" => Self::SocialProof,
            "TESTIMONIAL" | "QUOTE" => Self::Testimonial,
            _ => Self::Generic,
        }
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn is_design_notes_label(label: &str) -> bool {
    matches!(normalize_label(label).as_str(), "DESIGN NOTES" | "DESIGN NOTE")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
}

/// A `Label: value` line whose label is not a known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSection {
    pub kind: SectionKind,
    /// The label as written between the brackets.
    pub label: String,
    pub headline: Option<String>,
    pub subhead: Option<String>,
    pub body: Option<String>,
    pub bullets: Vec<String>,
    pub products: Vec<Product>,
    pub cta: Option<String>,
    pub extra: Vec<ExtraField>,
}

impl EmailSection {
    fn new(label: &str) -> Self {
        Self {
            kind: SectionKind::from_label(label),
            label: label.trim().to_string(),
            headline: None,
            subhead: None,
            body: None,
            bullets: Vec::new(),
            products: Vec::new(),
            cta: None,
            extra: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEmail {
    pub subject: Option<String>,
    pub preview: Option<String>,
    /// Leading `Approach:`/`Strategy:` note.
    pub approach: Option<String>,
    /// Other prose before the first section.
    pub intro: Option<String>,
    pub sections: Vec<EmailSection>,
    /// Trailing design notes, after a `Design Notes:` line or `[DESIGN NOTES]`.
    pub design_notes: Option<String>,
}

/// Cheap gate: at least one recognized section label on its own line.
pub fn is_structured_email_copy(text: &str) -> bool {
    text.lines().any(|line| {
        SECTION_LABEL
            .captures(line)
            .is_some_and(|caps| SectionKind::from_label(&caps["label"]) != SectionKind::Generic)
    })
}

/// Parses structured email copy; `None` when [`is_structured_email_copy`]
/// would say no.
pub fn parse_email_copy(text: &str) -> Option<ParsedEmail> {
    if !is_structured_email_copy(text) {
        return None;
    }

    let mut email = ParsedEmail::default();
    let mut preamble = Preamble::default();
    let mut current: Option<SectionBuilder> = None;
    let mut notes: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(notes) = notes.as_mut() {
            notes.push(line);
            continue;
        }

        if let Some(caps) = SECTION_LABEL.captures(line) {
            let label = &caps["label"];
            if let Some(done) = current.take() {
                email.sections.push(done.finish());
            }
            if is_design_notes_label(label) {
                notes = Some(Vec::new());
            } else {
                current = Some(SectionBuilder::new(label));
            }
            continue;
        }

        if let Some(caps) = FIELD.captures(line)
            && is_design_notes_label(&caps["label"])
        {
            if let Some(done) = current.take() {
                email.sections.push(done.finish());
            }
            let first = caps.name("value").map_or("", |m| m.as_str());
            notes = Some(vec![first]);
            continue;
        }

        match current.as_mut() {
            Some(section) => section.push_line(line),
            None => preamble.push_line(line),
        }
    }

    if let Some(done) = current.take() {
        email.sections.push(done.finish());
    }

    preamble.finish(&mut email);
    email.design_notes = notes.and_then(|lines| non_empty(lines.join("\n")));
    Some(email)
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    BULLET_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim)
}

/// A labelled field, unless the "label" is really a URL scheme.
fn field(line: &str) -> Option<(String, String)> {
    let caps = FIELD.captures(line)?;
    let value = caps.name("value").map_or("", |m| m.as_str());
    if value.starts_with("//") {
        return None;
    }
    Some((caps["label"].trim().to_string(), value.to_string()))
}

/// Text before the first section.
#[derive(Default)]
struct Preamble {
    subject: Option<String>,
    preview: Option<String>,
    approach: Vec<String>,
    intro: Vec<String>,
    in_approach: bool,
}

impl Preamble {
    fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.in_approach = false;
            self.intro.push(String::new());
            return;
        }
        if let Some((label, value)) = field(line) {
            match label.to_lowercase().as_str() {
                "subject" | "subject line" => {
                    self.subject = Some(value);
                    self.in_approach = false;
                    return;
                }
                "preview" | "preview text" | "preheader" => {
                    self.preview = Some(value);
                    self.in_approach = false;
                    return;
                }
                "approach" | "strategy" => {
                    self.approach.push(value);
                    self.in_approach = true;
                    return;
                }
                _ => {}
            }
        }
        if self.in_approach {
            self.approach.push(line.trim().to_string());
        } else {
            self.intro.push(line.to_string());
        }
    }

    fn finish(self, email: &mut ParsedEmail) {
        email.subject = self.subject.and_then(non_empty);
        email.preview = self.preview.and_then(non_empty);
        email.approach = non_empty(self.approach.join("\n"));
        email.intro = non_empty(self.intro.join("\n"));
    }
}

/// Which field unlabelled lines continue.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Continues {
    Body,
    Subhead,
    Headline,
}

struct SectionBuilder {
    section: EmailSection,
    body: Vec<String>,
    continues: Continues,
}

impl SectionBuilder {
    fn new(label: &str) -> Self {
        Self {
            section: EmailSection::new(label),
            body: Vec::new(),
            continues: Continues::Body,
        }
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.continues = Continues::Body;
            if !self.body.is_empty() {
                self.body.push(String::new());
            }
            return;
        }

        if let Some(item) = strip_bullet(line) {
            if self.section.kind == SectionKind::ProductGrid
                && let Some(product) = product_row(item)
            {
                self.section.products.push(product);
            } else {
                self.section.bullets.push(item.to_string());
            }
            return;
        }

        if let Some((label, value)) = field(line) {
            self.push_field(label, value);
            return;
        }

        match self.continues {
            Continues::Headline => append(&mut self.section.headline, trimmed),
            Continues::Subhead => append(&mut self.section.subhead, trimmed),
            Continues::Body => self.body.push(trimmed.to_string()),
        }
    }

    fn push_field(&mut self, label: String, value: String) {
        self.continues = Continues::Body;
        match label.to_lowercase().as_str() {
            "headline" | "heading" | "header" | "title" => {
                self.section.headline = Some(value);
                self.continues = Continues::Headline;
            }
            "subhead" | "subheadline" | "subheading" | "subtitle" => {
                self.section.subhead = Some(value);
                self.continues = Continues::Subhead;
            }
            "body" | "copy" | "text" | "body copy" => {
                if !value.is_empty() {
                    self.body.push(value);
                }
            }
            "cta" | "button" | "cta text" | "button text" | "cta button" => {
                self.section.cta = Some(value);
            }
            "product" | "product name" | "name" => self.section.products.push(Product {
                name: value,
                ..Product::default()
            }),
            "description" | "product description" => match self.section.products.last_mut() {
                Some(product) => product.description = Some(value),
                None => self.push_extra(label, value),
            },
            "price" => match self.section.products.last_mut() {
                Some(product) => product.price = Some(value),
                None => self.push_extra(label, value),
            },
            _ => self.push_extra(label, value),
        }
    }

    fn push_extra(&mut self, label: String, value: String) {
        self.section.extra.push(ExtraField { label, value });
    }

    fn finish(mut self) -> EmailSection {
        while self.body.last().is_some_and(String::is_empty) {
            self.body.pop();
        }
        self.section.body = non_empty(self.body.join("\n"));
        self.section
    }
}

fn append(field: &mut Option<String>, line: &str) {
    match field {
        Some(existing) if !existing.is_empty() => {
            existing.push(' ');
            existing.push_str(line);
        }
        _ => *field = Some(line.to_string()),
    }
}

/// `Name | description | price`
fn product_row(item: &str) -> Option<Product> {
    let mut cells = item.split(PRODUCT_SEPARATOR).map(str::trim);
    let name = cells.next().filter(|n| !n.is_empty())?;
    let description = cells.next().filter(|d| !d.is_empty())?;
    let price = cells.next().filter(|p| !p.is_empty());
    Some(Product {
        name: name.to_string(),
        description: Some(description.to_string()),
        price: price.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Just a friendly note about our sale.", false)]
    #[case("Use [brackets] inline freely", false)]
    #[case("[VERSION_A]\nhello", false)]
    #[case("[HERO]\nHeadline: Hi", true)]
    #[case("intro\n  [cta block]  \nCTA: Go", true)]
    #[case("[Social_Proof]", true)]
    fn gate(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_structured_email_copy(text), expected);
    }

    #[test]
    fn prose_parses_to_none() {
        assert_eq!(parse_email_copy("Hello there"), None);
    }

    #[test]
    fn full_email() {
        let text = "\
Subject: Spring is here
Preview: 20% off everything
**Approach:** Lead with the discount,
then build urgency.

[HERO]
Headline: Spring Sale
Subhead: This weekend only
CTA: Shop now

[BULLETS]
- Free shipping
* Easy returns
• Gift wrapping

[PRODUCT GRID]
Product: Linen Shirt
Description: Breathable and light
Price: $49
- Canvas Tote | Carries everything | $25

[TEXT]
Body: We rarely do this.
So make it count.

Seriously.
Tone: warm

[TESTIMONIAL]
\"Best shirt I own.\" (Sam)

Design Notes:
Use the pastel palette.
Keep the hero image tall.";

        let email = parse_email_copy(text).unwrap();
        assert_eq!(email.subject.as_deref(), Some("Spring is here"));
        assert_eq!(email.preview.as_deref(), Some("20% off everything"));
        assert_eq!(
            email.approach.as_deref(),
            Some("Lead with the discount,\nthen build urgency.")
        );
        assert_eq!(email.intro, None);

        let kinds: Vec<_> = email.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Hero,
                SectionKind::Bullets,
                SectionKind::ProductGrid,
                SectionKind::Text,
                SectionKind::Testimonial,
            ]
        );

        let hero = &email.sections[0];
        assert_eq!(hero.headline.as_deref(), Some("Spring Sale"));
        assert_eq!(hero.subhead.as_deref(), Some("This weekend only"));
        assert_eq!(hero.cta.as_deref(), Some("Shop now"));

        assert_eq!(
            email.sections[1].bullets,
            vec!["Free shipping", "Easy returns", "Gift wrapping"]
        );

        let products = &email.sections[2].products;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Linen Shirt");
        assert_eq!(products[0].description.as_deref(), Some("Breathable and light"));
        assert_eq!(products[0].price.as_deref(), Some("$49"));
        assert_eq!(products[1].name, "Canvas Tote");
        assert_eq!(products[1].price.as_deref(), Some("$25"));

        let body = &email.sections[3];
        assert_eq!(
            body.body.as_deref(),
            Some("We rarely do this.\nSo make it count.\n\nSeriously.")
        );
        assert_eq!(
            body.extra,
            vec![ExtraField {
                label: "Tone".into(),
                value: "warm".into()
            }]
        );

        assert_eq!(
            email.sections[4].body.as_deref(),
            Some("\"Best shirt I own.\" (Sam)")
        );
        assert_eq!(
            email.design_notes.as_deref(),
            Some("Use the pastel palette.\nKeep the hero image tall.")
        );
    }

    #[test]
    fn unknown_labels_are_generic_sections() {
        let email = parse_email_copy("[HERO]\nHeadline: A\n[FOOTER]\nUnsubscribe: link").unwrap();
        assert_eq!(email.sections[1].kind, SectionKind::Generic);
        assert_eq!(email.sections[1].label, "FOOTER");
        assert_eq!(email.sections[1].extra[0].label, "Unsubscribe");
    }

    #[test]
    fn bracket_design_notes() {
        let email = parse_email_copy("[CTA]\nCTA: Buy\n[DESIGN NOTES]\nBig button").unwrap();
        assert_eq!(email.sections.len(), 1);
        assert_eq!(email.design_notes.as_deref(), Some("Big button"));
    }

    #[test]
    fn urls_are_not_fields() {
        let email = parse_email_copy("[TEXT]\nhttps://example.com/sale").unwrap();
        assert!(email.sections[0].extra.is_empty());
        assert_eq!(
            email.sections[0].body.as_deref(),
            Some("https://example.com/sale")
        );
    }

    #[test]
    fn headline_continues_on_next_line() {
        let email = parse_email_copy("[HERO]\nHeadline: Big\nNews\n\nMore words").unwrap();
        assert_eq!(email.sections[0].headline.as_deref(), Some("Big News"));
        assert_eq!(email.sections[0].body.as_deref(), Some("More words"));
    }

    #[test]
    fn leading_prose_is_intro() {
        let email = parse_email_copy("Here's the draft:\n\n[HERO]\nHeadline: Hi").unwrap();
        assert_eq!(email.intro.as_deref(), Some("Here's the draft:"));
    }

    #[test]
    fn streaming_prefix_parses() {
        let email = parse_email_copy("[HERO]\nHeadline: Spr").unwrap();
        assert_eq!(email.sections[0].headline.as_deref(), Some("Spr"));
    }
}
