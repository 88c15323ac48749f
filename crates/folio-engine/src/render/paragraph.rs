//! Paragraph assembly and line break cleanup.

use regex::Regex;
use std::sync::OnceLock;

fn block_tag_regex() -> &'static Regex {
    static BLOCK_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    // `h` covers h1-h6 and hr.
    BLOCK_TAG_REGEX.get_or_init(|| {
        Regex::new(r"^</?(h|ul|ol|li|blockquote|pre)").expect("Invalid block tag regex")
    })
}

fn lone_image_regex() -> &'static Regex {
    static LONE_IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    LONE_IMAGE_REGEX.get_or_init(|| Regex::new(r"^<img[^>]*>$").expect("Invalid image regex"))
}

fn empty_paragraph_regex() -> &'static Regex {
    static EMPTY_PARAGRAPH_REGEX: OnceLock<Regex> = OnceLock::new();
    EMPTY_PARAGRAPH_REGEX
        .get_or_init(|| Regex::new(r"<p>\s*</p>").expect("Invalid empty paragraph regex"))
}

fn line_break_regex() -> &'static Regex {
    static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid break regex"))
}

fn trailing_breaks_regex() -> &'static Regex {
    static TRAILING_BREAKS_REGEX: OnceLock<Regex> = OnceLock::new();
    TRAILING_BREAKS_REGEX
        .get_or_init(|| Regex::new(r"(<br>)+$").expect("Invalid trailing break regex"))
}

/// Whether a trimmed block already starts with a block-level tag.
pub fn is_block_level(block: &str) -> bool {
    block_tag_regex().is_match(block)
}

/// Wraps loose text blocks in `<p>` and turns the remaining blank lines
/// into `<br>`.
pub fn assemble(html: &str) -> String {
    let blocks: Vec<String> = html.split("\n\n").map(wrap_block).collect();

    let html = blocks.join("\n\n").replace("\n\n", "<br>");
    let html = empty_paragraph_regex().replace_all(&html, "");
    let html = line_break_regex().replace_all(&html, "<br>");
    trailing_breaks_regex().replace(&html, "").into_owned()
}

fn wrap_block(block: &str) -> String {
    let trimmed = block.trim();
    // A block that is nothing but one image stays bare; text next to an
    // image still gets a paragraph.
    if trimmed.is_empty() || is_block_level(trimmed) || lone_image_regex().is_match(trimmed) {
        block.to_string()
    } else {
        format!("<p>{trimmed}</p>")
    }
}
