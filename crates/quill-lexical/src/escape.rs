//! HTML escaping for text content and attribute values.

/// Escape a string for use in HTML text content or a quoted attribute value.
///
/// Escapes `&`, `<`, `>`, `"` and `'`, which is sufficient for both
/// contexts as long as attributes are always double-quoted.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("héllo wörld"), "héllo wörld");
    }

    #[test]
    fn test_escape_html_already_escaped_is_escaped_again() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
