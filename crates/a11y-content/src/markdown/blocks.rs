//! Line-oriented block parsing: heading segments, bullet lists, and fenced
//! code blocks.
//!
//! These are deliberately not a CommonMark implementation. Authoring content
//! only uses `##`/`###` headings, `-`/`*`/`N.` bullets, and triple-backtick
//! fences, and the mappers depend on the exact behavior documented here.
//!
//! # Example
//!
//! ```rust
//! use a11y_content::markdown::blocks::{split_by_heading, to_bullet_list, HeadingPattern};
//!
//! let body = "## Must Haves\n- Label every input\n  - Visible text preferred\n- Trap focus\n";
//! let segments = split_by_heading(body, HeadingPattern::Section);
//! assert_eq!(segments[0].title.as_deref(), Some("Must Haves"));
//!
//! let items = to_bullet_list(&segments[0].body);
//! assert_eq!(items, vec!["Label every input\n  - Visible text preferred", "Trap focus"]);
//! ```

use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser};
use regex::Regex;
use serde::{Deserialize, Serialize};

static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(\S.*?)\s*$").expect("valid section heading regex"));

static RULE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+(?i:rule)\s*:\s*(\S.*?)\s*$").expect("valid rule heading regex")
});

static SUBSECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(\S.*?)\s*$").expect("valid subsection heading regex"));

static ANY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}(\s|$)").expect("valid heading regex"));

static THEMATIC_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$")
        .expect("valid thematic break regex")
});

static TOP_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*]|\d+\.)(?:\s+(.*))?$").expect("valid bullet regex"));

static NESTED_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {2,}(?:[-*]|\d+\.)(?:\s+(.*))?$").expect("valid nested bullet regex")
});

/// Language reported for fences without an info string.
pub const UNLABELED_FENCE_LANGUAGE: &str = "text";

// ============================================================================
// Heading segments
// ============================================================================

/// Which heading lines start a new segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingPattern {
    /// `## <title>`: pattern document sections.
    Section,
    /// `## Rule: <title>`: one block per baseline rule.
    Rule,
    /// `### <title>`: subsections inside a rule block.
    Subsection,
}

impl HeadingPattern {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Section => &*SECTION_HEADING,
            Self::Rule => &*RULE_HEADING,
            Self::Subsection => &*SUBSECTION_HEADING,
        }
    }

    /// Returns the heading title if `line` is a heading of this kind.
    pub fn match_title(self, line: &str) -> Option<String> {
        self.regex()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// A heading and the text under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Heading title, or `None` for text before the first heading.
    pub title: Option<String>,
    /// Lines up to the next matching heading, without leading or trailing
    /// blank lines.
    pub body: String,
}

/// Split `text` into segments at every heading matching `pattern`.
///
/// Each matching heading closes the previous segment. Non-matching headings
/// (for example `##` lines when splitting by [`HeadingPattern::Rule`]) stay in
/// the current body. Heading lines inside a closed fenced code block never
/// split. Text before the first heading is returned as an untitled segment
/// when it is not blank; callers that have no use for it skip it.
pub fn split_by_heading(text: &str, pattern: HeadingPattern) -> Vec<Segment> {
    let lines: Vec<&str> = text.lines().collect();
    let fenced = fenced_line_mask(&lines);

    let mut segments = Vec::new();
    let mut title: Option<String> = None;
    let mut start = 0;

    for (i, line) in lines.iter().enumerate() {
        if fenced[i] {
            continue;
        }
        if let Some(heading) = pattern.match_title(line) {
            push_segment(&mut segments, title.take(), &lines[start..i]);
            title = Some(heading);
            start = i + 1;
        }
    }
    push_segment(&mut segments, title, &lines[start..]);

    segments
}

fn push_segment(segments: &mut Vec<Segment>, title: Option<String>, lines: &[&str]) {
    let body = trim_blank_lines(lines);
    if title.is_none() && body.is_empty() {
        return;
    }
    segments.push(Segment { title, body });
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Normalize a heading title for comparison against known labels.
///
/// Strips inline markdown (emphasis, code spans, links), maps curly
/// apostrophes to `'` and non-breaking spaces to spaces, collapses
/// whitespace, lowercases, and drops trailing `:` or `.`.
///
/// ```rust
/// use a11y_content::markdown::blocks::normalize_heading_label;
///
/// assert_eq!(normalize_heading_label("**Don\u{2019}ts:**"), "don'ts");
/// assert_eq!(normalize_heading_label("Use\u{a0}When."), "use when");
/// ```
pub fn normalize_heading_label(label: &str) -> String {
    let mut plain = String::new();
    for event in Parser::new(label) {
        match event {
            Event::Text(text) | Event::Code(text) => plain.push_str(&text),
            Event::SoftBreak | Event::HardBreak => plain.push(' '),
            _ => {}
        }
    }
    if plain.trim().is_empty() {
        plain = label.to_string();
    }

    let plain = plain
        .replace(['\u{2019}', '\u{2018}'], "'")
        .replace('\u{a0}', " ")
        .to_lowercase();
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches([':', '.'])
        .trim_end()
        .to_string()
}

// ============================================================================
// Bullet lists
// ============================================================================

#[derive(Debug, Default)]
struct OpenBullet {
    text: String,
    children: Vec<String>,
}

impl OpenBullet {
    fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            children: Vec::new(),
        }
    }

    fn continue_with(&mut self, line: &str) {
        let target = self.children.last_mut().unwrap_or(&mut self.text);
        append_wrapped(target, line.trim());
    }

    fn render(self) -> Option<String> {
        let children: Vec<String> = self
            .children
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect();
        if self.text.is_empty() && children.is_empty() {
            return None;
        }
        let mut out = self.text;
        for child in children {
            out.push_str("\n  - ");
            out.push_str(&child);
        }
        Some(out)
    }
}

fn append_wrapped(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

/// Extract bullet items from a segment body.
///
/// - Top-level bullets start at column 0 with `- `, `* ` or `N. `.
/// - Indented bullets (two or more spaces) while a bullet is open become
///   sub-items, rendered as `"<parent>\n  - <child>"`. With no bullet open
///   they start a top-level item instead.
/// - Other non-blank lines while a bullet is open are soft-wrap
///   continuations, joined with a single space to the most recent item
///   (the last sub-item if there is one).
/// - Blank lines are ignored. Tabs count as two spaces.
/// - Heading lines, thematic breaks (`---`, `***`, `___`) and closed fenced
///   code blocks end the open bullet and are not part of any item.
///
/// Always returns a list, possibly empty.
pub fn to_bullet_list(segment: &str) -> Vec<String> {
    let normalized = segment.replace('\t', "  ");
    let lines: Vec<&str> = normalized.lines().collect();
    let fenced = fenced_line_mask(&lines);

    let mut items = Vec::new();
    let mut open: Option<OpenBullet> = None;
    let flush = |open: &mut Option<OpenBullet>, items: &mut Vec<String>| {
        if let Some(item) = open.take().and_then(OpenBullet::render) {
            items.push(item);
        }
    };

    for (i, line) in lines.iter().enumerate() {
        if fenced[i] || ANY_HEADING.is_match(line) || THEMATIC_BREAK.is_match(line) {
            flush(&mut open, &mut items);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = TOP_BULLET.captures(line) {
            flush(&mut open, &mut items);
            open = Some(OpenBullet::new(caps.get(1).map_or("", |m| m.as_str())));
        } else if let Some(caps) = NESTED_BULLET.captures(line) {
            let text = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            match open.as_mut() {
                Some(bullet) => bullet.children.push(text),
                None => open = Some(OpenBullet::new(&text)),
            }
        } else if let Some(bullet) = open.as_mut() {
            bullet.continue_with(line);
        }
    }
    flush(&mut open, &mut items);

    items
}

// ============================================================================
// Fenced code blocks
// ============================================================================

/// A triple-backtick fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FencedBlock {
    /// Lowercased language tag, or `"text"` for unlabeled fences.
    pub language: String,
    /// Code between the fences, whitespace-trimmed.
    pub code: String,
}

#[derive(Debug)]
struct FenceSpan {
    open: usize,
    close: usize,
    language: Option<String>,
}

fn fence_info(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("```").map(str::trim)
}

fn is_closing_fence(line: &str) -> bool {
    matches!(fence_info(line), Some(rest) if rest.chars().all(|c| c == '`'))
}

/// Locate every closed fence. An opening fence without a closing line is
/// not a fence at all; scanning resumes on the line after it.
fn fence_spans(lines: &[&str]) -> Vec<FenceSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(info) = fence_info(lines[i]) else {
            i += 1;
            continue;
        };
        let close = (i + 1..lines.len()).find(|&j| is_closing_fence(lines[j]));
        match close {
            Some(close) => {
                let language = info
                    .split_whitespace()
                    .next()
                    .map(|tag| tag.trim_matches('`').to_lowercase())
                    .filter(|tag| !tag.is_empty());
                spans.push(FenceSpan {
                    open: i,
                    close,
                    language,
                });
                i = close + 1;
            }
            None => i += 1,
        }
    }
    spans
}

fn fenced_line_mask(lines: &[&str]) -> Vec<bool> {
    let mut mask = vec![false; lines.len()];
    for span in fence_spans(lines) {
        mask[span.open..=span.close].fill(true);
    }
    mask
}

fn block_from_span(lines: &[&str], span: &FenceSpan) -> FencedBlock {
    FencedBlock {
        language: span
            .language
            .clone()
            .unwrap_or_else(|| UNLABELED_FENCE_LANGUAGE.to_string()),
        code: lines[span.open + 1..span.close].join("\n").trim().to_string(),
    }
}

/// Find the first fenced block whose language tag equals `language`
/// (case-insensitive). Unlabeled fences never match.
pub fn find_first_fenced_block(text: &str, language: &str) -> Option<FencedBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let wanted = language.trim().to_lowercase();
    fence_spans(&lines)
        .iter()
        .find(|span| span.language.as_deref() == Some(wanted.as_str()))
        .map(|span| block_from_span(&lines, span))
}

/// Find every fenced block in document order.
pub fn find_all_fenced_blocks(text: &str) -> Vec<FencedBlock> {
    let lines: Vec<&str> = text.lines().collect();
    fence_spans(&lines)
        .iter()
        .map(|span| block_from_span(&lines, span))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
