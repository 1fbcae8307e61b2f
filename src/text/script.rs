//! Script detection and single-line truncation.

/// Check whether a character is a CJK unified ideograph (including
/// extension A).
pub fn is_cjk_char(ch: char) -> bool {
    matches!(ch as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF)
}

/// Check whether any character of `text` is a CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Truncate `text` to at most `budget` characters, ending with `ellipsis`
/// when anything was cut.
///
/// The ellipsis counts toward the budget. When the budget cannot even hold
/// the ellipsis, the text is cut hard.
pub fn truncate_to_budget(text: &str, budget: usize, ellipsis: &str) -> String {
    let len = text.chars().count();
    if len <= budget {
        return text.to_string();
    }

    let marker_len = ellipsis.chars().count();
    if budget <= marker_len {
        return text.chars().take(budget).collect();
    }

    let mut out: String = text.chars().take(budget - marker_len).collect();
    out.push_str(ellipsis);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cjk_char() {
        assert!(is_cjk_char('中'));
        assert!(is_cjk_char('㐀'));
        assert!(!is_cjk_char('a'));
        assert!(!is_cjk_char('，'));
        assert!(!is_cjk_char('한'));
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("Revenue 增长"));
        assert!(!contains_cjk("Revenue grew"));
        assert!(!contains_cjk(""));
    }

    #[test]
    fn test_truncate_to_budget() {
        assert_eq!(truncate_to_budget("short", 10, ".."), "short");
        assert_eq!(truncate_to_budget("abcdefghij", 6, ".."), "abcd..");
        assert_eq!(truncate_to_budget("销售额同比增长", 5, "..."), "销售...");
        assert_eq!(truncate_to_budget("abcdef", 2, "..."), "ab");
    }
}
