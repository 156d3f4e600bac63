use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Placeholder replaced by a version id inside version marker templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// The textual markers an upstream model emits around structured content.
///
/// These are a contract with the generation prompts, so every token is
/// configurable. Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    /// Start of a version block, e.g. `[VERSION_{id}]`.
    pub version_start: String,
    /// End of a version block, e.g. `[END_VERSION_{id}]`.
    pub version_end: String,
    pub version_ids: Vec<String>,
    /// Prefix of the optional strategy line opening a version.
    pub strategy_prefix: String,
    pub suggestions_open: String,
    pub suggestions_close: String,
    pub plan_open: String,
    pub plan_close: String,
    pub confirm_open: String,
    pub confirm_close: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            version_start: "[VERSION_{id}]".to_string(),
            version_end: "[END_VERSION_{id}]".to_string(),
            version_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            strategy_prefix: "Strategy:".to_string(),
            suggestions_open: "[SUGGESTIONS]".to_string(),
            suggestions_close: "[/SUGGESTIONS]".to_string(),
            plan_open: "[FLOW_PLAN]".to_string(),
            plan_close: "[/FLOW_PLAN]".to_string(),
            confirm_open: "[CONFIRM]".to_string(),
            confirm_close: "[/CONFIRM]".to_string(),
        }
    }
}

impl MarkerSyntax {
    /// Validates the syntax and builds the scanners once.
    pub fn compile(&self) -> Result<CompiledMarkers> {
        for id in &self.version_ids {
            if id.is_empty() || !id.chars().all(char::is_alphanumeric) {
                return Err(EngineError::InvalidVersionId(id.clone()));
            }
        }
        if self.version_ids.is_empty() {
            return Err(EngineError::EmptyMarker {
                name: "version_ids",
            });
        }

        let start = split_template(&self.version_start)?;
        let end = split_template(&self.version_end)?;
        let ids = self
            .version_ids
            .iter()
            .map(|id| regex::escape(id))
            .collect::<Vec<_>>()
            .join("|");

        // End first, so a start template that is a suffix of the end
        // template never claims an end marker.
        let version = RegexBuilder::new(&format!(
            r"(?:{}(?P<end>{ids}){})|(?:{}(?P<start>{ids}){})",
            regex::escape(end.0),
            regex::escape(end.1),
            regex::escape(start.0),
            regex::escape(start.1),
        ))
        .case_insensitive(true)
        .build()?;

        let strategy = if self.strategy_prefix.trim().is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&format!(
                    r"^\s*(?:\*\*)?{}(?:\*\*)?\s*(?P<note>.*?)\s*(?:\*\*)?\s*$",
                    regex::escape(self.strategy_prefix.trim())
                ))
                .case_insensitive(true)
                .build()?,
            )
        };

        let flow = [
            ("suggestions_open", &self.suggestions_open),
            ("suggestions_close", &self.suggestions_close),
            ("plan_open", &self.plan_open),
            ("plan_close", &self.plan_close),
            ("confirm_open", &self.confirm_open),
            ("confirm_close", &self.confirm_close),
        ];
        for (name, marker) in flow {
            if marker.trim().is_empty() {
                return Err(EngineError::EmptyMarker { name });
            }
        }
        let flow = RegexBuilder::new(&format!(
            r"(?P<suggestions_open>{})|(?P<suggestions_close>{})|(?P<plan_open>{})|(?P<plan_close>{})|(?P<confirm_open>{})|(?P<confirm_close>{})",
            regex::escape(self.suggestions_open.trim()),
            regex::escape(self.suggestions_close.trim()),
            regex::escape(self.plan_open.trim()),
            regex::escape(self.plan_close.trim()),
            regex::escape(self.confirm_open.trim()),
            regex::escape(self.confirm_close.trim()),
        ))
        .case_insensitive(true)
        .build()?;

        Ok(CompiledMarkers {
            syntax: self.clone(),
            version,
            strategy,
            flow,
        })
    }

    /// Every concrete version marker, used to recognise a marker that is
    /// still arriving at the tail of a stream.
    pub(crate) fn rendered_version_markers(&self) -> Vec<String> {
        self.version_ids
            .iter()
            .flat_map(|id| {
                [
                    self.version_start.replace(ID_PLACEHOLDER, &id.to_uppercase()),
                    self.version_end.replace(ID_PLACEHOLDER, &id.to_uppercase()),
                ]
            })
            .collect()
    }
}

fn split_template(template: &str) -> Result<(&str, &str)> {
    let Some((prefix, suffix)) = template.split_once(ID_PLACEHOLDER) else {
        return Err(EngineError::MissingIdPlaceholder {
            template: template.to_string(),
        });
    };
    if prefix.trim().is_empty() && suffix.trim().is_empty() {
        return Err(EngineError::EmptyMarker {
            name: "version marker",
        });
    }
    Ok((prefix, suffix))
}

/// Marker syntax with its regexes built.
#[derive(Debug, Clone)]
pub struct CompiledMarkers {
    pub(crate) syntax: MarkerSyntax,
    pub(crate) version: Regex,
    pub(crate) strategy: Option<Regex>,
    /// Any flow block opener or closer, as named groups.
    pub(crate) flow: Regex,
}

impl CompiledMarkers {
    pub fn syntax(&self) -> &MarkerSyntax {
        &self.syntax
    }

    /// Drops a partially received marker from the end of a streaming buffer,
    /// so `[VERS` never flashes up as literal text.
    pub(crate) fn trim_partial_marker<'a>(&self, text: &'a str) -> &'a str {
        let s = &self.syntax;
        let candidates = s.rendered_version_markers().into_iter().chain(
            [
                &s.suggestions_open,
                &s.suggestions_close,
                &s.plan_open,
                &s.plan_close,
                &s.confirm_open,
                &s.confirm_close,
            ]
            .into_iter()
            .cloned(),
        );

        let mut cut = text.len();
        for marker in candidates {
            for k in (1..marker.len()).rev() {
                if k > text.len() || !marker.is_char_boundary(k) {
                    continue;
                }
                let tail_start = text.len() - k;
                if text.is_char_boundary(tail_start)
                    && text[tail_start..].eq_ignore_ascii_case(&marker[..k])
                {
                    cut = cut.min(tail_start);
                    break;
                }
            }
        }
        &text[..cut]
    }
}

impl Default for CompiledMarkers {
    fn default() -> Self {
        MarkerSyntax::default()
            .compile()
            .expect("default marker syntax compiles")
    }
}
