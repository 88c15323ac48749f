//! Markdown to HTML rendering pipeline.
//!
//! [`render`] threads one buffer through a fixed sequence of passes. Each
//! pass returns a fresh buffer built from the previous one, and the order is
//! load-bearing: later passes assume the output shape of earlier ones.
//!
//! 1. [`code_fence`] stashes fenced code so nothing below can reach it
//! 2. [`blocks`] converts rules, headings and blockquotes line by line
//! 3. [`lists`] groups marker lines into `<ul>`/`<ol>` elements
//! 4. [`inline`] resolves emphasis, code spans, links and images
//! 5. [`paragraph`] wraps loose text and normalises line breaks
//!
//! The stashed code bodies are put back as the very last step.

pub mod blocks;
pub mod code_fence;
pub mod escape;
pub mod inline;
pub mod lists;
pub mod paragraph;

pub use escape::escape_html;

/// Renders a markdown document into an HTML content fragment.
///
/// Never fails: malformed input (unterminated emphasis, an unmatched fence)
/// still produces HTML, just not necessarily the HTML the author meant.
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let normalized = markdown.replace("\r\n", "\n");

    let (html, stash) = code_fence::extract(&normalized);
    let html = blocks::convert_rules(&html);
    let html = blocks::convert_headings(&html);
    let html = blocks::convert_blockquotes(&html);
    let html = lists::convert_lists(&html);
    let html = inline::format_inline(&html);
    let html = paragraph::assemble(&html);

    stash.restore(&html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_renders_empty_fragment() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn heading_is_not_wrapped_in_paragraph() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
    }

    #[test]
    fn fenced_code_is_escaped_and_tagged() {
        assert_eq!(
            render("```js\nconst a = 1 < 2;\n```"),
            r#"<pre><code class="language-js">const a = 1 &lt; 2;</code></pre>"#
        );
    }

    #[test]
    fn consecutive_bullets_share_one_list() {
        assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn list_kind_change_closes_and_reopens() {
        assert_eq!(
            render("- a\n1. b"),
            "<ul><li>a</li></ul>\n<ol><li>b</li></ol>"
        );
    }

    #[test]
    fn link_with_title() {
        let html = render(r#"[x](http://e "t")"#);
        assert!(html.contains(r#"<a href="http://e" title="t" target="_blank">x</a>"#));
    }

    #[test]
    fn standalone_image_without_title() {
        assert_eq!(render("![a](s.png)"), r#"<img src="s.png" alt="a">"#);
    }

    #[test]
    fn markdown_inside_fenced_code_is_inert() {
        let html = render("```\n# not a heading\n- not a list\n**not bold** and _not em_\n\n> nor a quote\n```");
        assert_eq!(
            html,
            "<pre><code># not a heading\n- not a list\n**not bold** and _not em_\n\n&gt; nor a quote</code></pre>"
        );
    }

    #[test]
    fn crlf_input_renders_like_lf() {
        assert_eq!(render("# A\r\n\r\ntext"), render("# A\n\ntext"));
    }

    #[test]
    fn emphasis_inside_code_span_is_converted_first() {
        // Code spans are resolved after emphasis, so they do not protect
        // their contents.
        assert_eq!(render("`a*b*c`"), "<p><code>a<em>b</em>c</code></p>");
    }

    #[test]
    fn rendering_is_not_idempotent() {
        let once = render("Some text\n\nMore text");
        let twice = render(&once);
        assert_ne!(once, twice);
    }

    #[test]
    fn whole_document_snapshot() {
        let markdown = r#"# Jane Doe

Researcher working on **compilers** and _type systems_.

## Selected work

- Built a [parser](https://example.com/p "Parser") in Rust
- Wrote ~~three~~ four papers
1. First
2. Second

> Simplicity is prerequisite for reliability.

---

```rust
fn main() { println!("<hi>"); }
```"#;

        insta::assert_snapshot!(render(markdown), @r#"
        <h1>Jane Doe</h1><br><p>Researcher working on <strong>compilers</strong> and <em>type systems</em>.</p><br><h2>Selected work</h2><br><ul><li>Built a <a href="https://example.com/p" title="Parser" target="_blank">parser</a> in Rust</li><li>Wrote <del>three</del> four papers</li></ul>
        <ol><li>First</li><li>Second</li></ol><br><blockquote>Simplicity is prerequisite for reliability.</blockquote><br><hr><br><pre><code class="language-rust">fn main() { println!(&quot;&lt;hi&gt;&quot;); }</code></pre>
        "#);
    }
}
