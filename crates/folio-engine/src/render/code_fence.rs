//! Fenced code block extraction.
//!
//! Runs before every other pass. Each block is replaced by its final
//! `<pre><code>` wrapper, but the escaped body is held in a [`CodeStash`]
//! and the buffer only carries a placeholder token. Line and inline passes
//! therefore never see code text, and [`CodeStash::restore`] swaps the
//! bodies back in once the pipeline is done.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::escape::escape_html;

/// Delimiters around a stash index in the buffer. Private-use code points,
/// so no markdown pass treats them as syntax.
const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

fn fence_regex() -> &'static Regex {
    static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    FENCE_REGEX.get_or_init(|| {
        // Non-greedy body: a block ends at the next closing fence.
        Regex::new(r"(?s)```(\w*)\n(.*?)\n```").expect("Invalid fence regex")
    })
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(&format!("{TOKEN_OPEN}([0-9]+){TOKEN_CLOSE}")).expect("Invalid token regex")
    })
}

/// Escaped code bodies pulled out of a document, indexed by placeholder.
#[derive(Debug, Default)]
pub struct CodeStash {
    bodies: Vec<String>,
}

impl CodeStash {
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn push(&mut self, body: String) -> String {
        let index = self.bodies.len();
        self.bodies.push(body);
        format!("{TOKEN_OPEN}{index}{TOKEN_CLOSE}")
    }

    /// Puts every stashed body back where its placeholder sits.
    ///
    /// Tokens that do not name a stashed body are left as they are.
    pub fn restore(&self, html: &str) -> String {
        if self.bodies.is_empty() {
            return html.to_string();
        }

        token_regex()
            .replace_all(html, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.bodies.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Replaces fenced code blocks with `<pre><code>` wrappers around stash
/// placeholders, returning the new buffer and the stash.
///
/// Token delimiters already present in the document are dropped first, so
/// only placeholders written here can be restored.
pub fn extract(markdown: &str) -> (String, CodeStash) {
    let mut stash = CodeStash::default();
    let markdown = markdown.replace([TOKEN_OPEN, TOKEN_CLOSE], "");

    let html = fence_regex()
        .replace_all(&markdown, |caps: &Captures| {
            let lang = &caps[1];
            let body = escape_html(trim_blank_lines(&caps[2]));
            let token = stash.push(body);

            if lang.is_empty() {
                format!("<pre><code>{token}</code></pre>")
            } else {
                format!(r#"<pre><code class="language-{lang}">{token}</code></pre>"#)
            }
        })
        .into_owned();

    (html, stash)
}

/// Drops blank lines before the first code line and all trailing
/// whitespace. Indentation of the first code line is kept.
fn trim_blank_lines(body: &str) -> &str {
    let body = body.trim_end();
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &body[start..]
}
