//! Line-anchored block conversions: horizontal rules, headings and
//! blockquotes.
//!
//! These run after code extraction and before lists and inline formatting,
//! so text inside a heading or quote is still plain markdown when the
//! inline formatter gets to it.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn rule_regex() -> &'static Regex {
    static RULE_REGEX: OnceLock<Regex> = OnceLock::new();
    RULE_REGEX
        .get_or_init(|| Regex::new(r"(?m)^[ \t]*[-*_]{3,}[ \t]*$").expect("Invalid rule regex"))
}

fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").expect("Invalid heading regex"))
}

fn blockquote_regex() -> &'static Regex {
    static BLOCKQUOTE_REGEX: OnceLock<Regex> = OnceLock::new();
    BLOCKQUOTE_REGEX
        .get_or_init(|| Regex::new(r"(?m)^[ \t]*> (.*)$").expect("Invalid blockquote regex"))
}

/// A line made only of three or more `-`, `*` or `_` becomes `<hr>`.
pub fn convert_rules(html: &str) -> String {
    rule_regex().replace_all(html, "<hr>").into_owned()
}

/// `#` to `######` followed by a space become `<h1>` to `<h6>`.
///
/// The hash run is matched as a whole, so a six-hash line is always a
/// level six heading and never a level one heading with `#####` text.
pub fn convert_headings(html: &str) -> String {
    heading_regex()
        .replace_all(html, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

/// Every line starting with `> ` becomes its own `<blockquote>`.
///
/// Consecutive quoted lines are not merged into one element.
pub fn convert_blockquotes(html: &str) -> String {
    blockquote_regex()
        .replace_all(html, "<blockquote>$1</blockquote>")
        .into_owned()
}
