//! Integration tests for bracket matching and table extraction.

use narraflow::parser::{
    extract_tables, find_matching_bracket, find_outer_array_start, parse_grid, ExtractOptions,
    TableBlockExtractor,
};

const PLACEHOLDER: &str = "(table data extracted)";

#[test]
fn test_matching_bracket_is_total() {
    let samples = [
        "[]",
        "[[1,2],[3,4]]",
        "[\"]\", 'a]b', \"x\\\"]\"]",
        "[[\"unterminated\"",
        "[\"年份\",\"收入\"]",
        "[\\]",
        "[[[[",
    ];

    for text in samples {
        for (start, ch) in text.char_indices() {
            if ch != '[' {
                continue;
            }
            if let Some(end) = find_matching_bracket(text, start) {
                assert!(end < text.len(), "{text:?} start {start}");
                assert_eq!(&text[end..end + 1], "]", "{text:?} start {start}");
                assert!(end > start);
            }
        }
    }
}

#[test]
fn test_matching_bracket_skips_quoted_brackets() {
    let text = r#"[["a]", "b["], ["c", "d"]] tail"#;
    let end = find_matching_bracket(text, 0).unwrap();
    assert_eq!(&text[end + 1..], " tail");
}

#[test]
fn test_matching_bracket_non_bracket_start() {
    assert_eq!(find_matching_bracket("abc", 0), None);
    assert_eq!(find_matching_bracket("[a]", 10), None);
}

#[test]
fn test_outer_array_start_allows_whitespace() {
    assert_eq!(find_outer_array_start("see [ \n [1,2]]"), Some(4));
    assert_eq!(find_outer_array_start("see [1, [2]]"), None);
}

#[test]
fn test_fenced_row_count_matches_body() {
    let body = "[[\"Year\",\"Revenue\",\"Cost\"],[\"2022\",\"10\",\"7\"],[\"2023\",\"12\",\"8\"],[\"2024\",\"15\",\"9\"]]";
    let input = format!("Summary:\n```json:table\n{body}\n```\nEnd.");

    let (cleaned, grids) = extract_tables(&input);
    assert_eq!(cleaned, "Summary:\n\nEnd.");
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].row_count(), 4);
    assert_eq!(grids[0].column_count(), 3);
}

#[test]
fn test_multiple_fences_in_order() {
    let input = "```json:table\n[[\"a\",\"b\"],[\"1\",\"2\"]]\n```\nmid\n```json:table\n[[\"c\",\"d\"],[\"3\",\"4\"]]\n```";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(cleaned.trim(), "mid");
    assert_eq!(grids.len(), 2);
    assert_eq!(grids[0].rows[0], vec!["a", "b"]);
    assert_eq!(grids[1].rows[0], vec!["c", "d"]);
}

#[test]
fn test_unterminated_fence_left_as_text() {
    let input = "Intro\n```json:table\n[[\"a\"";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(cleaned, input);
    assert!(grids.is_empty());
}

#[test]
fn test_bare_literal_replaced_inline() {
    let input = "Quarterly: [[\"Q\",\"Sales\"],[\"Q1\",\"10\"],[\"Q2\",\"14\"]] as shown.";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(cleaned, format!("Quarterly: {PLACEHOLDER} as shown."));
    assert_eq!(grids[0].row_count(), 3);
}

#[test]
fn test_bare_literal_rejected_when_ragged() {
    let input = "data [[\"a\",\"b\",\"c\"],[\"1\"]] end";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(cleaned, input);
    assert!(grids.is_empty());
}

#[test]
fn test_bare_literal_rejected_single_column_header() {
    let (cleaned, grids) = extract_tables("[[\"only\"],[\"1\"]]");
    assert!(grids.is_empty());
    assert_eq!(cleaned, "[[\"only\"],[\"1\"]]");
}

#[test]
fn test_rejected_candidate_does_not_block_later_ones() {
    let input = "[[\"x\"],[\"y\"]] then [[\"a\",\"b\"],[\"1\",\"2\"]]";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(grids.len(), 1);
    assert!(cleaned.starts_with("[[\"x\"],[\"y\"]] then "));
    assert!(cleaned.ends_with(PLACEHOLDER));
}

#[test]
fn test_unterminated_bare_literal_stops_scan() {
    let input = "[[\"a\",\"b\"],[\"1\",\"2\"]";
    let (cleaned, grids) = extract_tables(input);
    assert_eq!(cleaned, input);
    assert!(grids.is_empty());
}

#[test]
fn test_parse_grid_quotes_and_escapes() {
    let grid = parse_grid(r#"[['a, b', "say \"hi\""], [ 1 , "x\ny" ]]"#);
    assert_eq!(grid.rows[0], vec!["a, b", "say \"hi\""]);
    assert_eq!(grid.rows[1], vec!["1", "x\ny"]);
}

#[test]
fn test_custom_fence_and_placeholder() {
    let extractor = TableBlockExtractor::with_options(
        ExtractOptions::new()
            .with_fence_marker("```table")
            .with_placeholder("[see table]"),
    );

    let input = "```table\n[[\"a\",\"b\"],[\"1\",\"2\"]]\n```\n[[\"c\",\"d\"],[\"3\",\"4\"]]";
    let (cleaned, grids) = extractor.extract(input);
    assert_eq!(cleaned, "\n[see table]");
    assert_eq!(grids.len(), 2);
}

#[test]
fn test_oversized_candidate_skipped() {
    let extractor =
        TableBlockExtractor::with_options(ExtractOptions::new().with_candidate_limits(20, 100));
    let input = "[[\"alpha\",\"beta\"],[\"gamma\",\"delta\"]]";
    let (cleaned, grids) = extractor.extract(input);
    assert_eq!(cleaned, input);
    assert!(grids.is_empty());
}
