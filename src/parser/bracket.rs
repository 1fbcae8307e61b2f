//! Quote- and escape-aware bracket scanning.
//!
//! All indices are byte offsets into the scanned `&str`. Functions return
//! `None` instead of panicking on malformed input or bad offsets.

/// Find the `]` that closes the `[` at byte offset `start`.
///
/// Brackets inside a quoted span (opened by `"` or `'`, closed by the same
/// character) are ignored, and a backslash inside a quoted span escapes the
/// next character. Returns `None` when `start` is not a `[` or the input
/// ends before the depth returns to zero.
pub fn find_matching_bracket(text: &str, start: usize) -> Option<usize> {
    let tail = text.get(start..)?;
    if !tail.starts_with('[') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, ch) in tail.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Find the first `[` that is followed, ignoring whitespace, by another `[`.
pub fn find_outer_array_start(text: &str) -> Option<usize> {
    find_outer_array_start_from(text, 0)
}

/// Like [`find_outer_array_start`], starting the scan at byte offset `from`.
pub fn find_outer_array_start_from(text: &str, from: usize) -> Option<usize> {
    let tail = text.get(from..)?;
    let mut open: Option<usize> = None;

    for (offset, ch) in tail.char_indices() {
        match (open, ch) {
            (Some(first), '[') => return Some(from + first),
            (Some(_), c) if c.is_whitespace() => {}
            (_, '[') => open = Some(offset),
            _ => open = None,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_match() {
        assert_eq!(find_matching_bracket("[1,2]", 0), Some(4));
        assert_eq!(find_matching_bracket("x [[a],[b]] y", 2), Some(10));
    }

    #[test]
    fn test_brackets_in_quotes_ignored() {
        let text = r#"["a]", 'b[', "c\"]"]"#;
        assert_eq!(find_matching_bracket(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_mixed_quotes() {
        // An apostrophe inside a double-quoted cell does not open a new quote.
        let text = r#"["it's", "]"]"#;
        assert_eq!(find_matching_bracket(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(find_matching_bracket("[[1,2]", 0), None);
        assert_eq!(find_matching_bracket(r#"["abc]"#, 0), None);
    }

    #[test]
    fn test_invalid_start() {
        assert_eq!(find_matching_bracket("abc", 0), None);
        assert_eq!(find_matching_bracket("[]", 5), None);
        // Offset inside a multi-byte character
        assert_eq!(find_matching_bracket("表[]", 1), None);
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "数据[[\"甲\",\"乙\"]]";
        let start = find_outer_array_start(text).unwrap();
        assert_eq!(&text[start..start + 1], "[");
        let end = find_matching_bracket(text, start).unwrap();
        assert_eq!(&text[end..], "]");
    }

    #[test]
    fn test_outer_array_start() {
        assert_eq!(find_outer_array_start("see [[1]]"), Some(4));
        assert_eq!(find_outer_array_start("see [ \n [1]]"), Some(4));
        assert_eq!(find_outer_array_start("[1] and [2]"), None);
        assert_eq!(find_outer_array_start("[x[1]]"), None);
        assert_eq!(find_outer_array_start(""), None);
    }

    #[test]
    fn test_outer_array_start_from() {
        let text = "[[a]] [[b]]";
        assert_eq!(find_outer_array_start_from(text, 1), Some(6));
        assert_eq!(find_outer_array_start_from(text, 100), None);
    }

    #[test]
    fn test_match_always_in_bounds() {
        let samples = ["[", "[[", "[\"", "['\\", "[[]", "[\\]", "[']'", "[[\"]\"]]"];
        for text in samples {
            for start in 0..=text.len() + 1 {
                if let Some(end) = find_matching_bracket(text, start) {
                    assert!(end < text.len());
                    assert_eq!(&text[end..end + 1], "]");
                }
            }
        }
    }
}
