use std::ops::Range;

use super::markers::CompiledMarkers;

/// One alternative draft embedded in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVersion {
    /// Lower-cased id, e.g. `a`.
    pub id: String,
    /// Display label, e.g. `Version A`.
    pub label: String,
    pub strategy: Option<String>,
    pub content: String,
    /// Still being written: streaming and no end marker yet.
    pub is_partial: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVersions {
    pub has_versions: bool,
    /// Prose before the first start marker. With no markers at all this is
    /// the whole message.
    pub before_content: String,
    /// Prose between a closed version and the next start marker, in
    /// message order.
    pub between_content: Vec<String>,
    /// Prose after the last closed version.
    pub after_content: String,
    pub versions: Vec<EmailVersion>,
    /// The version being written while streaming, else the first version.
    pub active_version: Option<String>,
}

impl ParsedVersions {
    pub fn version(&self, id: &str) -> Option<&EmailVersion> {
        self.versions.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }
}

#[derive(Debug)]
enum MarkerKind {
    Start,
    End,
}

#[derive(Debug)]
struct Marker {
    kind: MarkerKind,
    id: String,
    range: Range<usize>,
}

impl CompiledMarkers {
    /// Splits `text` into version blocks.
    ///
    /// A start marker with no end marker runs to the next start marker or
    /// the end of the buffer. End markers that do not close the open version
    /// stay in the text as written.
    pub fn parse_versions(&self, text: &str, streaming: bool) -> ParsedVersions {
        let text = if streaming {
            self.trim_partial_marker(text)
        } else {
            text
        };

        let markers: Vec<Marker> = self
            .version
            .captures_iter(text)
            .filter_map(|caps| {
                let range = caps.get(0)?.range();
                let (kind, id) = match (caps.name("start"), caps.name("end")) {
                    (Some(id), _) => (MarkerKind::Start, id),
                    (None, Some(id)) => (MarkerKind::End, id),
                    (None, None) => return None,
                };
                Some(Marker {
                    kind,
                    id: id.as_str().to_lowercase(),
                    range,
                })
            })
            .collect();

        let Some(first_start) = markers
            .iter()
            .find(|m| matches!(m.kind, MarkerKind::Start))
        else {
            return ParsedVersions {
                before_content: text.trim().to_string(),
                ..ParsedVersions::default()
            };
        };
        let before_content = text[..first_start.range.start].trim().to_string();

        let mut versions: Vec<EmailVersion> = Vec::new();
        let mut open: Option<(String, usize)> = None;
        let mut after_start: Option<usize> = None;
        let mut between_content = Vec::new();

        for marker in &markers {
            match marker.kind {
                MarkerKind::Start => {
                    if let Some((id, start)) = open.take() {
                        log::debug!("version {id} has no end marker before the next version");
                        self.push_version(
                            &mut versions,
                            id,
                            &text[start..marker.range.start],
                            streaming,
                        );
                    }
                    if let Some(start) = after_start.take() {
                        let prose = text[start..marker.range.start].trim();
                        if !prose.is_empty() {
                            between_content.push(prose.to_string());
                        }
                    }
                    open = Some((marker.id.clone(), marker.range.end));
                }
                MarkerKind::End => match open.take() {
                    Some((id, start)) if id == marker.id => {
                        self.push_version(
                            &mut versions,
                            id,
                            &text[start..marker.range.start],
                            false,
                        );
                        after_start = Some(marker.range.end);
                    }
                    other => open = other,
                },
            }
        }

        let mut active_version = None;
        if let Some((id, start)) = open {
            if streaming {
                active_version = Some(id.clone());
            }
            self.push_version(&mut versions, id, &text[start..], streaming);
        }

        let after_content = after_start
            .map(|start| text[start..].trim().to_string())
            .unwrap_or_default();

        ParsedVersions {
            has_versions: true,
            before_content,
            between_content,
            after_content,
            active_version: active_version.or_else(|| versions.first().map(|v| v.id.clone())),
            versions,
        }
    }

    /// Later blocks with the same id replace earlier ones in place.
    fn push_version(&self, versions: &mut Vec<EmailVersion>, id: String, body: &str, partial: bool) {
        let version = self.build_version(id, body, partial);
        match versions.iter_mut().find(|v| v.id == version.id) {
            Some(existing) => *existing = version,
            None => versions.push(version),
        }
    }

    fn build_version(&self, id: String, body: &str, partial: bool) -> EmailVersion {
        let body = body.trim();
        let (strategy, content) = match self.split_strategy(body) {
            Some((note, rest)) => (Some(note), rest),
            None => (None, body),
        };
        EmailVersion {
            label: format!("Version {}", id.to_uppercase()),
            id,
            strategy,
            content: content.trim().to_string(),
            is_partial: partial,
        }
    }

    /// A strategy line is only recognised as the first line of a version.
    fn split_strategy<'a>(&self, body: &'a str) -> Option<(String, &'a str)> {
        let re = self.strategy.as_ref()?;
        let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
        let caps = re.captures(first)?;
        let note = caps.name("note")?.as_str().trim();
        if note.is_empty() {
            return None;
        }
        Some((note.to_string(), rest))
    }
}
