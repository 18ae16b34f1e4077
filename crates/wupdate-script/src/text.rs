//! String helpers shared by the parser and the executor.

/// Characters removed by [`trim`].
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Remove leading and trailing spaces, tabs, carriage returns and newlines.
///
/// Unlike [`str::trim`], other Unicode whitespace is kept.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_blank)
}

/// Length of the blank prefix of `s`, in bytes.
pub(crate) fn leading_blank_len(s: &str) -> usize {
    s.len() - s.trim_start_matches(is_blank).len()
}

/// Return the text between the first and the last `"` of `s`.
///
/// With fewer than two quote characters `s` is returned unchanged. Anything
/// outside the outermost quotes is dropped, and inner quotes are kept.
pub fn strip_quotes(s: &str) -> &str {
    match (s.find('"'), s.rfind('"')) {
        (Some(first), Some(last)) if last > first => &s[first + 1..last],
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_ascii_blanks() {
        assert_eq!(trim(" \t\r\n value \n"), "value");
        assert_eq!(trim("   "), "");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn test_trim_keeps_other_whitespace() {
        assert_eq!(trim("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
    }

    #[test]
    fn test_strip_quotes_basic() {
        assert_eq!(strip_quotes("\"hello\""), "hello");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn test_strip_quotes_unquoted() {
        assert_eq!(strip_quotes("hello"), "hello");
        assert_eq!(strip_quotes("\"half"), "\"half");
    }

    #[test]
    fn test_strip_quotes_outermost_pair() {
        assert_eq!(strip_quotes("x\"a \"b\" c\"y"), "a \"b\" c");
    }

    #[test]
    fn test_leading_blank_len() {
        assert_eq!(leading_blank_len("\n\n  PRINT"), 4);
        assert_eq!(leading_blank_len("PRINT"), 0);
    }
}
