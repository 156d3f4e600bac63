use std::collections::HashMap;

use crate::markdown::{serialize::inline_to_markdown, tree::InlineNode};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Link, Strong},
};

/// How deep bold and italic may nest inside each other while a closer is
/// being searched for.
const MAX_NESTING: u8 = 4;

/// Parses one content span into inline runs.
///
/// Constructs are tried in precedence order at every position: code span
/// (raw zone), bold, italic, link. Anything that does not open and close
/// cleanly stays literal text, so concatenating the serialized runs gives
/// back every input character.
///
/// Bold and italic are rewritten with `*` delimiters. When that rewrite
/// would itself parse into different runs (literal delimiters next to
/// rewritten ones), the whole span stays literal text instead, so
/// normalizing a span twice gives the same result as normalizing it once.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    let nodes = parse_runs(s);
    let canonical = inline_to_markdown(&nodes, "\n");
    if canonical == s || inline_to_markdown(&parse_runs(&canonical), "\n") == canonical {
        return nodes;
    }
    log::trace!("inline span {s:?} changes again once rewritten, keeping it literal");
    vec![InlineNode::Text(s.to_string())]
}

fn parse_runs(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut spans = SpanFinder::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<InlineNode>, text: &str) {
        if !text.is_empty() {
            out.push(InlineNode::Text(text.to_string()));
        }
    }

    while !cur.eof() {
        let start = cur.i;
        let parsed = try_parse_code_span(&mut cur)
            .or_else(|| try_parse_strong(&mut cur, &mut spans))
            .or_else(|| try_parse_emphasis(&mut cur, &mut spans))
            .or_else(|| try_parse_link(&mut cur));

        if let Some(node) = parsed {
            flush_text(&mut out, &s[text_start..start]);
            out.push(node);
            text_start = cur.i;
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, &s[text_start..]);
    out
}

fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }
    let body = &cur.rest()[1..];
    let close = body.find(CodeSpan::TICK as char)?;
    if close == 0 {
        return None;
    }
    let content = body[..close].to_string();
    cur.bump_n(close + 2);
    Some(InlineNode::Code(content))
}

fn try_parse_strong(cur: &mut Cursor<'_>, spans: &mut SpanFinder<'_>) -> Option<InlineNode> {
    let len = spans.find(SpanKind::Strong, cur.i, 0)?;
    let delim = Strong::STARS.len();
    let inner = &cur.rest()[delim..len - delim];
    let node = InlineNode::Bold(parse_runs(inner));
    cur.bump_n(len);
    Some(node)
}

fn try_parse_emphasis(cur: &mut Cursor<'_>, spans: &mut SpanFinder<'_>) -> Option<InlineNode> {
    let len = spans.find(SpanKind::Emphasis, cur.i, 0)?;
    let inner = &cur.rest()[1..len - 1];
    let node = InlineNode::Italic(parse_runs(inner));
    cur.bump_n(len);
    Some(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SpanKind {
    Strong,
    Emphasis,
}

/// Bold and italic span lookup over one content span.
///
/// A closer search steps over complete code spans and over complete spans
/// of the other kind, so `*a **b***` closes the italic after the bold.
/// Lookups are remembered per opener position and nesting depth.
struct SpanFinder<'a> {
    s: &'a str,
    seen: HashMap<(SpanKind, usize, u8), Option<usize>>,
}

impl<'a> SpanFinder<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            s,
            seen: HashMap::new(),
        }
    }

    /// Byte length of the `kind` span opening at `at`, delimiters included.
    fn find(&mut self, kind: SpanKind, at: usize, depth: u8) -> Option<usize> {
        if let Some(&found) = self.seen.get(&(kind, at, depth)) {
            return found;
        }
        let found = match kind {
            SpanKind::Strong => self.strong(at, depth),
            SpanKind::Emphasis => self.emphasis(at, depth),
        };
        self.seen.insert((kind, at, depth), found);
        found
    }

    fn strong(&mut self, at: usize, depth: u8) -> Option<usize> {
        let s = self.s;
        let bytes = s.as_bytes();
        let delim: &[u8] = if bytes[at..].starts_with(Strong::STARS) {
            Strong::STARS
        } else if bytes[at..].starts_with(Strong::UNDERSCORES) {
            Strong::UNDERSCORES
        } else {
            return None;
        };
        let underscore = delim[0] == Emphasis::UNDERSCORE;
        if underscore && prev_char(s, at).is_some_and(char::is_alphanumeric) {
            return None;
        }

        let from = at + delim.len();
        let body = &s[from..];
        if body.is_empty() || body.starts_with(char::is_whitespace) {
            return None;
        }

        let close = self.scan(from, depth, SpanKind::Emphasis, |k, follows_span| {
            k > from
                && bytes[k..].starts_with(delim)
                && (follows_span || bytes[k - 1] != delim[0])
                && !s[..k].ends_with(char::is_whitespace)
                && !(underscore && s[k + delim.len()..].starts_with(char::is_alphanumeric))
        })?;
        Some(close + delim.len() - at)
    }

    fn emphasis(&mut self, at: usize, depth: u8) -> Option<usize> {
        let s = self.s;
        let bytes = s.as_bytes();
        let c = bytes[at];
        if c != Emphasis::STAR && c != Emphasis::UNDERSCORE {
            return None;
        }
        let underscore = c == Emphasis::UNDERSCORE;

        // A doubled delimiter belongs to bold, never to italic.
        if bytes.get(at + 1) == Some(&c) {
            return None;
        }
        if let Some(prev) = prev_char(s, at)
            && (prev == c as char || (underscore && prev.is_alphanumeric()))
        {
            return None;
        }

        let from = at + 1;
        let body = &s[from..];
        if body.is_empty() || body.starts_with(char::is_whitespace) {
            return None;
        }

        // A run of three closes the italic with its first delimiter and
        // leaves the pair for an enclosing bold.
        let close = self.scan(from, depth, SpanKind::Strong, |k, follows_span| {
            k > from
                && bytes[k] == c
                && matches!(run_len(bytes, k), 1 | 3)
                && (follows_span || bytes[k - 1] != c)
                && !s[..k].ends_with(char::is_whitespace)
                && !(underscore && s[k + 1..].starts_with(char::is_alphanumeric))
        })?;
        Some(close + 1 - at)
    }

    /// First offset from `from` where `is_close` holds. The closure also
    /// learns whether the offset directly follows a stepped-over span.
    fn scan(
        &mut self,
        from: usize,
        depth: u8,
        nested: SpanKind,
        is_close: impl Fn(usize, bool) -> bool,
    ) -> Option<usize> {
        let s = self.s;
        let bytes = s.as_bytes();
        let mut k = from;
        let mut span_end = None;
        while k < bytes.len() {
            if bytes[k] == CodeSpan::TICK
                && let Some(end) = s[k + 1..].find(CodeSpan::TICK as char)
                && end > 0
            {
                k += end + 2;
                continue;
            }
            if is_close(k, span_end == Some(k)) {
                return Some(k);
            }
            if depth < MAX_NESTING
                && let Some(len) = self.find(nested, k, depth + 1)
            {
                k += len;
                span_end = Some(k);
                continue;
            }
            k += 1;
        }
        None
    }
}

fn prev_char(s: &str, at: usize) -> Option<char> {
    s[..at].chars().next_back()
}

/// Length of the run of identical delimiter bytes starting at `k`.
fn run_len(bytes: &[u8], k: usize) -> usize {
    bytes[k..].iter().take_while(|&&b| b == bytes[k]).count()
}

fn try_parse_link(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Link::OPEN) || cur.prev_char() == Some(Link::IMAGE_BANG) {
        return None;
    }

    let rest = cur.rest();
    let text_end = rest.find(Link::TEXT_CLOSE as char)?;
    let text = &rest[1..text_end];
    if text.is_empty() || text.contains(Link::OPEN as char) {
        return None;
    }

    let after = &rest[text_end + 1..];
    if !after.starts_with(Link::URL_OPEN as char) {
        return None;
    }
    let url_end = after.find(Link::URL_CLOSE as char)?;
    let url = &after[1..url_end];
    // Titled links (`[t](url "title")`) and nested parens are passed through.
    if url.is_empty() || url.contains(char::is_whitespace) || url.contains(Link::URL_OPEN as char)
    {
        return None;
    }

    let node = InlineNode::Link {
        text: text.to_string(),
        url: url.to_string(),
    };
    cur.bump_n(text_end + 1 + url_end + 1);
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn parse_code_span() {
        assert_eq!(
            parse_inline("run `cargo` now"),
            vec![
                text("run "),
                InlineNode::Code("cargo".to_string()),
                text(" now")
            ]
        );
    }

    #[test]
    fn code_span_suppresses_bold() {
        assert_eq!(
            parse_inline("`**not bold**`"),
            vec![InlineNode::Code("**not bold**".to_string())]
        );
    }

    #[test]
    fn parse_bold_both_delimiters() {
        assert_eq!(
            parse_inline("**a**"),
            vec![InlineNode::Bold(vec![text("a")])]
        );
        assert_eq!(
            parse_inline("__a__"),
            vec![InlineNode::Bold(vec![text("a")])]
        );
    }

    #[test]
    fn parse_italic_both_delimiters() {
        assert_eq!(
            parse_inline("*a*"),
            vec![InlineNode::Italic(vec![text("a")])]
        );
        assert_eq!(
            parse_inline("_a_"),
            vec![InlineNode::Italic(vec![text("a")])]
        );
    }

    #[test]
    fn italic_inside_bold() {
        assert_eq!(
            parse_inline("**big *deal* here**"),
            vec![InlineNode::Bold(vec![
                text("big "),
                InlineNode::Italic(vec![text("deal")]),
                text(" here"),
            ])]
        );
    }

    #[test]
    fn triple_stars_close_italic_then_bold() {
        assert_eq!(
            parse_inline("**big *deal***"),
            vec![InlineNode::Bold(vec![
                text("big "),
                InlineNode::Italic(vec![text("deal")]),
            ])]
        );
        assert_eq!(
            parse_inline("*x **y***"),
            vec![InlineNode::Italic(vec![
                text("x "),
                InlineNode::Bold(vec![text("y")]),
            ])]
        );
    }

    #[test]
    fn italic_closes_after_nested_underscore_bold() {
        let expected = vec![InlineNode::Italic(vec![
            text("sale ends "),
            InlineNode::Bold(vec![text("today")]),
        ])];
        assert_eq!(parse_inline("_sale ends __today___"), expected);
        assert_eq!(parse_inline("*sale ends **today***"), expected);
    }

    #[test]
    fn rewritten_span_parses_to_itself() {
        for line in ["_*a_*", "*a_ _b*", "__a *b__ c*", "_x **y_ z**", "**a __b** c__"] {
            let once = inline_to_markdown(&parse_inline(line), "\n");
            let twice = inline_to_markdown(&parse_inline(&once), "\n");
            assert_eq!(once, twice, "input {line:?}");
        }
    }

    #[test]
    fn unclosed_delimiter_mix_is_text() {
        let line = "*a **b *c **d _e __f";
        assert_eq!(parse_inline(line), vec![text(line)]);
    }

    #[test]
    fn bold_inside_italic() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![InlineNode::Italic(vec![
                text("a "),
                InlineNode::Bold(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn snake_case_is_not_italic() {
        assert_eq!(parse_inline("my_var_name"), vec![text("my_var_name")]);
    }

    #[test]
    fn unclosed_bold_is_text() {
        assert_eq!(parse_inline("**open"), vec![text("**open")]);
    }

    #[test]
    fn spaced_asterisks_are_text() {
        assert_eq!(parse_inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
    }

    #[test]
    fn parse_link() {
        assert_eq!(
            parse_inline("see [docs](https://example.com)!"),
            vec![
                text("see "),
                InlineNode::Link {
                    text: "docs".to_string(),
                    url: "https://example.com".to_string()
                },
                text("!")
            ]
        );
    }

    #[test]
    fn image_and_titled_link_pass_through() {
        assert_eq!(parse_inline("![alt](a.png)"), vec![text("![alt](a.png)")]);
        assert_eq!(
            parse_inline("[t](https://x \"title\")"),
            vec![text("[t](https://x \"title\")")]
        );
    }

    #[test]
    fn multibyte_text_around_markup() {
        assert_eq!(
            parse_inline("café **crème** brûlée"),
            vec![
                text("café "),
                InlineNode::Bold(vec![text("crème")]),
                text(" brûlée")
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse_inline("").is_empty());
    }
}
