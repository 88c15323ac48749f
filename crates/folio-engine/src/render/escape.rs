/// Escapes `&`, `<`, `>`, `"` and `'` for embedding text in HTML.
///
/// Only fenced code bodies go through this. Angle brackets typed anywhere
/// else in a document pass into the fragment unescaped.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}
