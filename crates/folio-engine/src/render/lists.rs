//! List grouping as an explicit finite-state scan over lines.
//!
//! This is the only pass with memory across lines. Each line is classified
//! on its own ([`classify`]), then [`transition`] decides which list (if
//! any) to close and open before the line is emitted. A whole list group is
//! emitted as a single output line: `<ul><li>a</li><li>b</li></ul>`.

use regex::Regex;
use std::sync::OnceLock;

fn unordered_regex() -> &'static Regex {
    static UNORDERED_REGEX: OnceLock<Regex> = OnceLock::new();
    UNORDERED_REGEX.get_or_init(|| Regex::new(r"^\s*[*+-]\s+").expect("Invalid bullet regex"))
}

fn ordered_regex() -> &'static Regex {
    static ORDERED_REGEX: OnceLock<Regex> = OnceLock::new();
    ORDERED_REGEX.get_or_init(|| Regex::new(r"^\s*\d+\.\s+").expect("Invalid numbered regex"))
}

/// Which list, if any, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    None,
    Unordered,
    Ordered,
}

impl ListState {
    fn tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Unordered => Some("ul"),
            ListState::Ordered => Some("ol"),
        }
    }
}

/// Classification of a single line, independent of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `-`, `+` or `*` marker; carries the text after the marker.
    Unordered(&'a str),
    /// `N.` marker; carries the text after the marker.
    Ordered(&'a str),
    Other,
}

impl LineKind<'_> {
    /// The list state this line asks for.
    fn target(self) -> ListState {
        match self {
            LineKind::Unordered(_) => ListState::Unordered,
            LineKind::Ordered(_) => ListState::Ordered,
            LineKind::Other => ListState::None,
        }
    }
}

/// Tag changes needed before emitting a line, plus the state after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub close: Option<ListState>,
    pub open: Option<ListState>,
    pub next: ListState,
}

pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(m) = unordered_regex().find(line) {
        LineKind::Unordered(&line[m.end()..])
    } else if let Some(m) = ordered_regex().find(line) {
        LineKind::Ordered(&line[m.end()..])
    } else {
        LineKind::Other
    }
}

/// Staying in the same state changes nothing; any other move closes the
/// current list (if one is open) and opens the requested one (if any).
pub fn transition(state: ListState, line: LineKind<'_>) -> Transition {
    let target = line.target();
    if state == target {
        return Transition {
            close: None,
            open: None,
            next: state,
        };
    }

    Transition {
        close: (state != ListState::None).then_some(state),
        open: (target != ListState::None).then_some(target),
        next: target,
    }
}

pub fn convert_lists(html: &str) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut group = String::new();
    let mut state = ListState::None;

    for line in html.split('\n') {
        let kind = classify(line);
        let step = transition(state, kind);

        if let Some(tag) = step.close.and_then(ListState::tag) {
            group.push_str(&format!("</{tag}>"));
            output.push(std::mem::take(&mut group));
        }
        if let Some(tag) = step.open.and_then(ListState::tag) {
            group.push_str(&format!("<{tag}>"));
        }

        match kind {
            LineKind::Unordered(content) | LineKind::Ordered(content) => {
                group.push_str(&format!("<li>{content}</li>"));
            }
            LineKind::Other => output.push(line.to_string()),
        }

        state = step.next;
    }

    if let Some(tag) = state.tag() {
        group.push_str(&format!("</{tag}>"));
        output.push(group);
    }

    output.join("\n")
}
