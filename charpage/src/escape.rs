//! Text helpers shared by the document model and the HTML exporter
//!
//! - `escape_html` makes arbitrary user text safe to embed in markup
//! - `split_lines` derives the item lists stored as raw newline-delimited text

/// Escape HTML special characters
///
/// `&` is replaced first so the entities introduced by the later
/// substitutions are not escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Split raw text into trimmed, non-empty lines
///
/// Lines are separated by `\n` or `\r\n`; surrounding whitespace is trimmed
/// and blank lines are dropped. Order is preserved.
///
/// # Parameters
/// * `raw` - Newline-delimited text as edited by the user
///
/// # Returns
/// * `Vec<String>` - The derived line list
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_html_does_not_double_escape() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }

    #[test]
    fn test_escape_html_leaves_no_markup_characters() {
        let escaped = escape_html("<script>alert('x' && \"y\")</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert_eq!(escaped.matches('&').count(), escaped.matches(';').count());
    }

    #[test]
    fn test_split_lines_drops_blanks() {
        assert_eq!(split_lines("a\n\nb\n  \nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_crlf_and_trim() {
        assert_eq!(
            split_lines("  first \r\n\r\n\tsecond\r\nthird  "),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\r\n   \n").is_empty());
    }
}
