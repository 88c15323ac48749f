//! Inline formatting over the whole buffer.
//!
//! Substitutions run in a fixed order: bold, italic, strikethrough, inline
//! code, links, images. Code spans come after emphasis, so `` `a*b*c` ``
//! renders its middle as `<em>`. Existing content relies on that ordering.

use regex::{Captures, Regex};
use std::sync::OnceLock;

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static REGEX: OnceLock<Regex> = OnceLock::new();
            REGEX.get_or_init(|| Regex::new($pattern).expect("Invalid inline regex"))
        }
    };
}

cached_regex!(bold_stars_regex, r"\*\*(.*?)\*\*");
cached_regex!(bold_underscores_regex, r"__(.*?)__");
cached_regex!(italic_stars_regex, r"\*\b(.*?)\b\*");
cached_regex!(italic_underscores_regex, r"_([^_\s](?:[^_\n]*?[^_\s])?)_");
cached_regex!(strikethrough_regex, r"~~(.*?)~~");
cached_regex!(code_span_regex, r"`(.*?)`");
// Link text is either a whole image (the badge form `[![alt](src)](url)`)
// or plain text without brackets.
cached_regex!(
    link_regex,
    r#"\[((?:!\[[^\[\]<>]*\]\([^)\s<>"]+(?:\s+"[^"<>]+")?\))|[^\[\]]+)\]\(([^)\s]+)(?:\s+"([^"]+)")?\)"#
);
// No part of an image may span `<`, `>` or `"`, so it cannot reach into a
// tag the link pass already wrote.
cached_regex!(
    image_regex,
    r#"!\[([^\]<>]*)\]\(([^)\s<>"]+)(?:\s+"([^"<>]+)")?\)"#
);

pub fn format_inline(html: &str) -> String {
    let html = convert_bold(html);
    let html = convert_italic(&html);
    let html = convert_strikethrough(&html);
    let html = convert_code_spans(&html);
    let html = convert_links(&html);
    convert_images(&html)
}

/// `**x**` and `__x__` become `<strong>x</strong>`.
pub fn convert_bold(html: &str) -> String {
    let html = bold_stars_regex().replace_all(html, "<strong>$1</strong>");
    bold_underscores_regex()
        .replace_all(&html, "<strong>$1</strong>")
        .into_owned()
}

/// `*x*` and `_x_` become `<em>x</em>`.
///
/// Underscores only count at word edges, so `snake_case_name` stays as it is.
/// They are also left alone inside URLs: after `/`, `=` or `.`, and anywhere
/// in a link target.
pub fn convert_italic(html: &str) -> String {
    let html = italic_stars_regex().replace_all(html, "<em>$1</em>");
    italic_underscores_regex()
        .replace_all(&html, |caps: &Captures| {
            let Some(m) = caps.get(0) else {
                return String::new();
            };
            let prefix = &html[..m.start()];
            let before = prefix.chars().next_back();
            let after = html[m.end()..].chars().next();
            if before.is_some_and(|c| c.is_alphanumeric() || matches!(c, '/' | '=' | '.'))
                || after.is_some_and(char::is_alphanumeric)
                || in_link_target(prefix)
            {
                m.as_str().to_string()
            } else {
                format!("<em>{}</em>", &caps[1])
            }
        })
        .into_owned()
}

/// Whether text following `prefix` sits inside an unclosed `](...` target.
fn in_link_target(prefix: &str) -> bool {
    prefix
        .rfind("](")
        .is_some_and(|i| !prefix[i..].contains(|c: char| c == ')' || c.is_whitespace()))
}

/// `~~x~~` becomes `<del>x</del>`.
pub fn convert_strikethrough(html: &str) -> String {
    strikethrough_regex()
        .replace_all(html, "<del>$1</del>")
        .into_owned()
}

/// `` `x` `` becomes `<code>x</code>`.
pub fn convert_code_spans(html: &str) -> String {
    code_span_regex()
        .replace_all(html, "<code>$1</code>")
        .into_owned()
}

/// `[text](url "title")` becomes an anchor opening in a new tab.
///
/// A match directly after `!` is an image and is left for [`convert_images`].
pub fn convert_links(html: &str) -> String {
    link_regex()
        .replace_all(html, |caps: &Captures| {
            let Some(m) = caps.get(0) else {
                return String::new();
            };
            if html[..m.start()].ends_with('!') {
                return m.as_str().to_string();
            }

            let text = &caps[1];
            let url = &caps[2];
            match caps.get(3) {
                Some(title) => format!(
                    r#"<a href="{url}" title="{}" target="_blank">{text}</a>"#,
                    title.as_str()
                ),
                None => format!(r#"<a href="{url}" target="_blank">{text}</a>"#),
            }
        })
        .into_owned()
}

/// `![alt](src "title")` becomes `<img>`.
pub fn convert_images(html: &str) -> String {
    image_regex()
        .replace_all(html, |caps: &Captures| {
            let alt = &caps[1];
            let src = &caps[2];
            match caps.get(3) {
                Some(title) => format!(
                    r#"<img src="{src}" alt="{alt}" title="{}">"#,
                    title.as_str()
                ),
                None => format!(r#"<img src="{src}" alt="{alt}">"#),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("**bold**", "<strong>bold</strong>")]
    #[case("__bold__", "<strong>bold</strong>")]
    #[case("a **b** c **d**", "a <strong>b</strong> c <strong>d</strong>")]
    #[case("**unterminated", "**unterminated")]
    fn bold(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_bold(input), expected);
    }

    #[rstest]
    #[case("*em*", "<em>em</em>")]
    #[case("_em_", "<em>em</em>")]
    #[case("a *b* and *c*", "a <em>b</em> and <em>c</em>")]
    #[case("some _two words_ here", "some <em>two words</em> here")]
    #[case("snake_case_name", "snake_case_name")]
    #[case("2 * 3 * 4", "2 * 3 * 4")]
    #[case("_ spaced _", "_ spaced _")]
    #[case("(see _this_)", "(see <em>this</em>)")]
    #[case("ends with _this_.", "ends with <em>this</em>.")]
    #[case("e.com/_draft_/", "e.com/_draft_/")]
    #[case("?q=_v_", "?q=_v_")]
    #[case("file._x_", "file._x_")]
    #[case("[x](u#_top_)", "[x](u#_top_)")]
    fn italic(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_italic(input), expected);
    }

    #[test]
    fn strikethrough() {
        assert_eq!(convert_strikethrough("~~gone~~"), "<del>gone</del>");
    }

    #[test]
    fn code_span() {
        assert_eq!(convert_code_spans("use `cargo`"), "use <code>cargo</code>");
    }

    #[test]
    fn emphasis_reaches_into_code_spans() {
        assert_eq!(
            format_inline("`a*b*c`"),
            "<code>a<em>b</em>c</code>"
        );
    }

    #[rstest]
    #[case("[x](http://e)", r#"<a href="http://e" target="_blank">x</a>"#)]
    #[case(
        r#"[x](http://e "t")"#,
        r#"<a href="http://e" title="t" target="_blank">x</a>"#
    )]
    #[case(
        "[a](1) and [b](2)",
        r#"<a href="1" target="_blank">a</a> and <a href="2" target="_blank">b</a>"#
    )]
    #[case("[no url]()", "[no url]()")]
    #[case("[spaced](a b)", "[spaced](a b)")]
    fn links(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_links(input), expected);
    }

    #[rstest]
    #[case("![a](s.png)", r#"<img src="s.png" alt="a">"#)]
    #[case(
        r#"![a](s.png "Shot")"#,
        r#"<img src="s.png" alt="a" title="Shot">"#
    )]
    #[case("![](s.png)", r#"<img src="s.png" alt="">"#)]
    fn images(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_inline(input), expected);
    }

    #[test]
    fn link_pass_skips_images() {
        assert_eq!(convert_links("![a](s.png)"), "![a](s.png)");
    }

    #[test]
    fn link_next_to_image() {
        assert_eq!(
            format_inline("![i](i.png)[l](l.html)"),
            r#"<img src="i.png" alt="i"><a href="l.html" target="_blank">l</a>"#
        );
    }

    #[rstest]
    #[case(
        "[x](https://e.com/_draft_/)",
        r#"<a href="https://e.com/_draft_/" target="_blank">x</a>"#
    )]
    #[case(
        "[x](https://e.com/p?id=_a_)",
        r#"<a href="https://e.com/p?id=_a_" target="_blank">x</a>"#
    )]
    fn underscores_in_urls_are_not_emphasis(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_inline(input), expected);
    }

    #[test]
    fn image_inside_link_text_becomes_a_linked_image() {
        assert_eq!(
            format_inline("[![badge](b.svg)](https://ci)"),
            r#"<a href="https://ci" target="_blank"><img src="b.svg" alt="badge"></a>"#
        );
    }

    #[test]
    fn titled_image_inside_link_text() {
        assert_eq!(
            format_inline(r#"[![b](b.svg "Build")](https://ci "CI")"#),
            r#"<a href="https://ci" title="CI" target="_blank"><img src="b.svg" alt="b" title="Build"></a>"#
        );
    }

    #[test]
    fn image_never_spans_an_inserted_tag() {
        let html = r#"<a href="b.svg" target="_blank">![badge</a>](https://ci)"#;
        assert_eq!(convert_images(html), html);
    }

    #[test]
    fn formatting_inside_link_text() {
        assert_eq!(
            format_inline("[**bold** link](u)"),
            r#"<a href="u" target="_blank"><strong>bold</strong> link</a>"#
        );
    }
}
