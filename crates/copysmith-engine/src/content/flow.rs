use std::sync::LazyLock;

use regex::Regex;

use super::email::ExtraField;
use super::markers::CompiledMarkers;

/// `1. Title`, `2) Title`, `Email 3: Title`, optionally bold.
static TASK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<bold>\*\*)?(?P<email>email\s+)?(?P<n>\d{1,3})[.):]\s+(?P<title>.+?)\s*(?:\*\*)?\s*$")
        .expect("valid task regex")
});

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s+)?(?:\*\*)?(?P<label>[A-Za-z][A-Za-z ]{0,24}?)(?:\*\*)?:(?:\*\*)?\s*(?P<value>.*?)\s*$")
        .expect("valid flow field regex")
});

const CHIP_PREFIXES: [&str; 3] = ["- ", "* ", "• "];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowTask {
    pub title: String,
    pub timing: Option<String>,
    pub email_type: Option<String>,
    pub key_points: Vec<String>,
    pub cta: Option<String>,
    pub extra: Vec<ExtraField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowPlan {
    pub name: Option<String>,
    pub goal: Option<String>,
    /// Unlabelled prose ahead of the first task.
    pub description: Option<String>,
    pub tasks: Vec<FlowTask>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfirm {
    pub message: String,
    /// Segment index of the nearest preceding plan, if any.
    pub plan_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowSegment {
    Text(String),
    Suggestions(Vec<String>),
    Plan(FlowPlan),
    Confirm(FlowConfirm),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowContent {
    pub segments: Vec<FlowSegment>,
}

impl FlowContent {
    /// True when any block marker was recognised.
    pub fn has_blocks(&self) -> bool {
        self.segments
            .iter()
            .any(|s| !matches!(s, FlowSegment::Text(_)))
    }

    /// The plan a confirm segment at `index` refers to.
    pub fn plan_for(&self, index: usize) -> Option<&FlowPlan> {
        let FlowSegment::Confirm(confirm) = self.segments.get(index)? else {
            return None;
        };
        match self.segments.get(confirm.plan_index?)? {
            FlowSegment::Plan(plan) => Some(plan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Suggestions,
    Plan,
    Confirm,
}

impl BlockKind {
    fn from_open(caps: &regex::Captures<'_>) -> Option<Self> {
        if caps.name("suggestions_open").is_some() {
            Some(Self::Suggestions)
        } else if caps.name("plan_open").is_some() {
            Some(Self::Plan)
        } else if caps.name("confirm_open").is_some() {
            Some(Self::Confirm)
        } else {
            None
        }
    }

    fn closes(self, caps: &regex::Captures<'_>) -> bool {
        let group = match self {
            Self::Suggestions => "suggestions_close",
            Self::Plan => "plan_close",
            Self::Confirm => "confirm_close",
        };
        caps.name(group).is_some()
    }
}

impl CompiledMarkers {
    /// Splits a message into text and flow blocks, in order.
    ///
    /// Text ahead of a block is only emitted once the block closes, so an
    /// unterminated block degrades to one text run that is a slice of the
    /// message.
    pub fn parse_flow(&self, text: &str) -> FlowContent {
        let mut segments = Vec::new();
        let mut pos = 0;
        let mut open: Option<(BlockKind, usize, usize)> = None;

        for caps in self.flow.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            match open {
                None => {
                    if let Some(kind) = BlockKind::from_open(&caps) {
                        open = Some((kind, m.start(), m.end()));
                    }
                }
                Some((kind, marker_start, body_start)) if kind.closes(&caps) => {
                    push_text(&mut segments, &text[pos..marker_start]);
                    let body = &text[body_start..m.start()];
                    let segment = match kind {
                        BlockKind::Suggestions => FlowSegment::Suggestions(parse_suggestions(body)),
                        BlockKind::Plan => FlowSegment::Plan(parse_plan(body)),
                        BlockKind::Confirm => FlowSegment::Confirm(FlowConfirm {
                            message: body.trim().to_string(),
                            plan_index: segments
                                .iter()
                                .rposition(|s| matches!(s, FlowSegment::Plan(_))),
                        }),
                    };
                    segments.push(segment);
                    pos = m.end();
                    open = None;
                }
                Some(_) => {}
            }
        }

        if let Some((kind, _, _)) = open {
            log::debug!("unterminated {kind:?} block, keeping it as text");
        }
        push_text(&mut segments, &text[pos..]);

        FlowContent { segments }
    }
}

fn push_text(segments: &mut Vec<FlowSegment>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        segments.push(FlowSegment::Text(text.to_string()));
    }
}

fn strip_list_prefix(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = CHIP_PREFIXES.iter().find_map(|p| line.strip_prefix(p)) {
        return rest.trim();
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = line[digits..].strip_prefix(". ")
    {
        return rest.trim();
    }
    line
}

fn parse_suggestions(body: &str) -> Vec<String> {
    body.lines()
        .map(strip_list_prefix)
        .filter(|chip| !chip.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_plan(body: &str) -> FlowPlan {
    let mut plan = FlowPlan::default();
    let mut description: Vec<&str> = Vec::new();
    // Numbered points seen so far while inside a `Key points:` list.
    let mut key_points: Option<usize> = None;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = TASK_HEADING.captures(line) {
            let title = caps["title"].trim_end_matches('*').trim().to_string();
            // A plain number that continues the point list is a point; bold
            // or `Email N:` headings always open a task.
            let explicit = caps.name("bold").is_some() || caps.name("email").is_some();
            let number = caps["n"].parse::<usize>().ok();
            if !explicit
                && let Some(count) = key_points
                && number == Some(count + 1)
                && let Some(task) = plan.tasks.last_mut()
            {
                task.key_points.push(title);
                key_points = Some(count + 1);
                continue;
            }
            plan.tasks.push(FlowTask {
                title,
                ..FlowTask::default()
            });
            key_points = None;
            continue;
        }

        let field = FIELD
            .captures(line)
            .map(|caps| (caps["label"].trim().to_string(), caps["value"].to_string()));

        let Some(task) = plan.tasks.last_mut() else {
            let key = field.as_ref().map(|(label, _)| label.to_lowercase());
            match (key.as_deref(), field) {
                (Some("name" | "plan" | "flow" | "flow name"), Some((_, value))) => {
                    plan.name = Some(value)
                }
                (Some("goal" | "objective"), Some((_, value))) => plan.goal = Some(value),
                _ => description.push(trimmed),
            }
            continue;
        };

        match field {
            Some((label, value)) => {
                key_points = None;
                match label.to_lowercase().as_str() {
                    "timing" | "send" | "when" | "delay" => task.timing = Some(value),
                    "type" | "email type" => task.email_type = Some(value),
                    "cta" | "call to action" => task.cta = Some(value),
                    "key points" | "points" | "key messages" => {
                        if !value.is_empty() {
                            task.key_points.push(value);
                        }
                        key_points = Some(0);
                    }
                    _ => task.extra.push(ExtraField { label, value }),
                }
            }
            None => {
                let point = strip_list_prefix(line);
                if key_points.is_some() || point.len() != trimmed.len() {
                    task.key_points.push(point.to_string());
                } else {
                    task.extra.push(ExtraField {
                        label: String::new(),
                        value: trimmed.to_string(),
                    });
                }
            }
        }
    }

    let description = description.join("\n");
    plan.description = (!description.is_empty()).then_some(description);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> FlowContent {
        CompiledMarkers::default().parse_flow(text)
    }

    #[test]
    fn plain_text_is_single_segment() {
        let flow = parse("Nothing special here.");
        assert_eq!(
            flow.segments,
            vec![FlowSegment::Text("Nothing special here.".into())]
        );
        assert!(!flow.has_blocks());
        assert!(parse("").segments.is_empty());
    }

    #[test]
    fn suggestions_become_chips() {
        let flow = parse(
            "Pick one:\n[SUGGESTIONS]\n- Welcome series\n* Win-back\n3. Abandoned cart\n[/SUGGESTIONS]",
        );
        assert_eq!(
            flow.segments,
            vec![
                FlowSegment::Text("Pick one:".into()),
                FlowSegment::Suggestions(vec![
                    "Welcome series".into(),
                    "Win-back".into(),
                    "Abandoned cart".into()
                ]),
            ]
        );
    }

    #[test]
    fn plan_with_tasks_and_confirm() {
        let text = "\
Here's the plan.
[FLOW_PLAN]
Name: Welcome Series
Goal: Convert new subscribers
A gentle three-step intro.
1. Welcome email
Timing: Immediately
Type: Welcome
Key points:
- Thank them
- Brand story
CTA: Shop bestsellers
**2. Social proof**
Timing: Day 3
Key points: Reviews from real customers
Subject: You're in good company
[/FLOW_PLAN]
[CONFIRM]
Does this plan look good?
[/CONFIRM]";

        let flow = parse(text);
        assert_eq!(flow.segments.len(), 3);
        assert!(flow.has_blocks());

        let FlowSegment::Plan(plan) = &flow.segments[1] else {
            panic!("expected plan");
        };
        assert_eq!(plan.name.as_deref(), Some("Welcome Series"));
        assert_eq!(plan.goal.as_deref(), Some("Convert new subscribers"));
        assert_eq!(plan.description.as_deref(), Some("A gentle three-step intro."));
        assert_eq!(plan.tasks.len(), 2);

        let first = &plan.tasks[0];
        assert_eq!(first.title, "Welcome email");
        assert_eq!(first.timing.as_deref(), Some("Immediately"));
        assert_eq!(first.email_type.as_deref(), Some("Welcome"));
        assert_eq!(first.key_points, vec!["Thank them", "Brand story"]);
        assert_eq!(first.cta.as_deref(), Some("Shop bestsellers"));

        let second = &plan.tasks[1];
        assert_eq!(second.title, "Social proof");
        assert_eq!(second.key_points, vec!["Reviews from real customers"]);
        assert_eq!(second.extra[0].label, "Subject");

        let FlowSegment::Confirm(confirm) = &flow.segments[2] else {
            panic!("expected confirm");
        };
        assert_eq!(confirm.message, "Does this plan look good?");
        assert_eq!(confirm.plan_index, Some(1));
        assert_eq!(flow.plan_for(2), Some(plan));
    }

    #[test]
    fn numbered_key_points_stay_in_their_task() {
        let flow = parse(
            "[FLOW_PLAN]\n1. Welcome email\nKey points:\n1. Thank them\n2. Brand story\nCTA: Shop\n2. Follow-up\n[/FLOW_PLAN]",
        );
        let FlowSegment::Plan(plan) = &flow.segments[0] else {
            panic!("expected plan");
        };
        let titles: Vec<&str> = plan.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Welcome email", "Follow-up"]);
        assert_eq!(plan.tasks[0].key_points, vec!["Thank them", "Brand story"]);
        assert_eq!(plan.tasks[0].cta.as_deref(), Some("Shop"));
    }

    #[test]
    fn numbered_line_breaking_point_sequence_opens_task() {
        let flow = parse(
            "[FLOW_PLAN]\n1. Welcome\nKey points:\n1. Thank them\n2. Follow-up\nKey points:\n- Remind\n**3. Last call**\n[/FLOW_PLAN]",
        );
        let FlowSegment::Plan(plan) = &flow.segments[0] else {
            panic!("expected plan");
        };
        // `2.` continues the list; the bold `3.` is a heading regardless.
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.tasks[0].key_points, vec!["Thank them", "Follow-up", "Remind"]);
        assert_eq!(plan.tasks[1].title, "Last call");
    }

    #[test]
    fn confirm_refers_to_nearest_plan() {
        let flow = parse(
            "[FLOW_PLAN]\nName: One\n[/FLOW_PLAN]\ntext\n[FLOW_PLAN]\nName: Two\n[/FLOW_PLAN]\n[CONFIRM]ok?[/CONFIRM]",
        );
        let FlowSegment::Confirm(confirm) = &flow.segments[3] else {
            panic!("expected confirm");
        };
        assert_eq!(confirm.plan_index, Some(2));
        assert_eq!(flow.plan_for(3).and_then(|p| p.name.as_deref()), Some("Two"));
    }

    #[test]
    fn confirm_without_plan() {
        let flow = parse("[CONFIRM]Go ahead?[/CONFIRM]");
        assert_eq!(
            flow.segments,
            vec![FlowSegment::Confirm(FlowConfirm {
                message: "Go ahead?".into(),
                plan_index: None
            })]
        );
        assert_eq!(flow.plan_for(0), None);
    }

    #[test]
    fn unterminated_block_degrades_to_text() {
        let text = "Intro\n[FLOW_PLAN]\nName: Half";
        assert_eq!(parse(text).segments, vec![FlowSegment::Text(text.into())]);

        let text = "[CONFIRM]ok[/CONFIRM]\nThen\n\n[SUGGESTIONS]\n- a";
        assert_eq!(
            parse(text).segments[1],
            FlowSegment::Text("Then\n\n[SUGGESTIONS]\n- a".into())
        );
    }

    #[test]
    fn stray_closer_stays_text() {
        let flow = parse("a [/CONFIRM] b");
        assert_eq!(flow.segments, vec![FlowSegment::Text("a [/CONFIRM] b".into())]);
    }

    #[test]
    fn markers_are_case_insensitive() {
        let flow = parse("[suggestions]\n- x\n[/Suggestions]");
        assert_eq!(flow.segments, vec![FlowSegment::Suggestions(vec!["x".into()])]);
    }
}
