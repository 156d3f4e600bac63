//! # Structured Content Parsers
//!
//! Scanners for the mini-languages an assistant embeds in otherwise free
//! text: alternative email versions, structured email sections and flow
//! plans. Every parser is a pure function of the buffer it is given, so a
//! streaming caller simply re-parses the whole buffer after each chunk.
//!
//! Marker tokens are configuration ([`MarkerSyntax`]); the free functions
//! here use the default syntax.

pub mod email;
pub mod flow;
pub mod markers;
pub mod versions;

use std::sync::LazyLock;

pub use email::{
    EmailSection, ExtraField, ParsedEmail, Product, SectionKind, is_structured_email_copy,
    parse_email_copy,
};
pub use flow::{FlowConfirm, FlowContent, FlowPlan, FlowSegment, FlowTask};
pub use markers::{CompiledMarkers, MarkerSyntax};
pub use versions::{EmailVersion, ParsedVersions};

static DEFAULT_MARKERS: LazyLock<CompiledMarkers> = LazyLock::new(CompiledMarkers::default);

/// Version blocks under the default marker syntax.
pub fn parse_versions(text: &str, streaming: bool) -> ParsedVersions {
    DEFAULT_MARKERS.parse_versions(text, streaming)
}

/// Flow segments under the default marker syntax.
pub fn parse_flow_content(text: &str) -> FlowContent {
    DEFAULT_MARKERS.parse_flow(text)
}

/// [`classify_message`] under the default marker syntax.
pub fn classify_default(text: &str, streaming: bool) -> MessageView {
    classify_message(text, &DEFAULT_MARKERS, streaming)
}

/// Which renderer an assistant message needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageView {
    Versions(ParsedVersions),
    Flow(FlowContent),
    Email(ParsedEmail),
    Plain(String),
}

/// Picks the renderer for `text`: versions first, then flow blocks, then
/// structured email, else plain markdown.
///
/// While `streaming`, a marker still arriving at the end of the buffer is
/// hidden from every view.
pub fn classify_message(text: &str, markers: &CompiledMarkers, streaming: bool) -> MessageView {
    let text = if streaming {
        markers.trim_partial_marker(text)
    } else {
        text
    };

    let versions = markers.parse_versions(text, streaming);
    if versions.has_versions {
        return MessageView::Versions(versions);
    }

    let flow = markers.parse_flow(text);
    if flow.has_blocks() {
        return MessageView::Flow(flow);
    }

    if let Some(email) = parse_email_copy(text) {
        return MessageView::Email(email);
    }

    MessageView::Plain(text.to_string())
}
