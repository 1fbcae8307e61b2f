//! Tables written as text lines: markdown pipe tables and key=value runs.

use crate::model::TableGrid;

use super::markdown::strip_emphasis;

/// Label separators, tried in order.
const LABEL_SEPARATORS: [&str; 2] = ["：", ": "];

/// Labels longer than this (in characters) are not labels.
const MAX_LABEL_CHARS: usize = 60;

/// Check whether a trimmed line belongs to a pipe table.
pub(crate) fn is_pipe_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Parse consecutive pipe-table lines.
///
/// Separator rows (`|---|:--:|`) are skipped. Returns `None` unless at least
/// two lines are given and a header with two or more columns remains.
pub(crate) fn parse_pipe_table(lines: &[&str]) -> Option<TableGrid> {
    if lines.len() < 2 {
        return None;
    }

    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| split_pipe_row(line))
        .filter(|cells| !is_separator_row(cells))
        .collect();

    let grid = TableGrid::new(rows);
    if grid.column_count() < 2 {
        return None;
    }
    Some(grid)
}

fn split_pipe_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| strip_emphasis(cell.trim()))
        .collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| {
        !cell.is_empty() && cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
    })
}

/// Parse a run of key=value lines starting at `lines[0]`.
///
/// Every line must carry the same key sequence (two or more keys) and the
/// run must be at least two lines long. Returns the grid and the number of
/// lines consumed.
pub(crate) fn parse_key_value_run(lines: &[&str], label_header: &str) -> Option<(TableGrid, usize)> {
    let (first_label, first_keys, _) = extract_key_values(lines.first()?.trim())?;

    let mut entries = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        match extract_key_values(trimmed) {
            Some((label, keys, values)) if keys == first_keys => entries.push((label, values)),
            _ => break,
        }
    }

    if entries.len() < 2 {
        return None;
    }

    let labelled = first_label.is_some();
    let mut header = Vec::with_capacity(first_keys.len() + 1);
    if labelled {
        header.push(label_header.to_string());
    }
    header.extend(first_keys);

    let mut rows = vec![header];
    let consumed = entries.len();
    for (label, values) in entries {
        let mut row = Vec::with_capacity(values.len() + 1);
        if labelled {
            row.push(label.unwrap_or_default());
        }
        row.extend(values);
        rows.push(row);
    }

    Some((TableGrid::new(rows), consumed))
}

/// Split `label：k1=v1，k2=v2` into its label, keys and values.
///
/// Returns `None` unless the line holds at least two `k=v` parts and nothing
/// else.
fn extract_key_values(line: &str) -> Option<(Option<String>, Vec<String>, Vec<String>)> {
    let mut content = strip_list_marker(line.trim_start());
    let mut label = None;

    for separator in LABEL_SEPARATORS {
        if let Some(idx) = content.find(separator) {
            let head = &content[..idx];
            let rest = &content[idx + separator.len()..];
            if idx > 0 && head.chars().count() < MAX_LABEL_CHARS && rest.contains('=') {
                label = Some(strip_emphasis(head.trim()));
                content = rest;
                break;
            }
        }
    }

    let mut keys = Vec::new();
    let mut values = Vec::new();
    for part in content.split([',', '，']) {
        let part = part.trim();
        let eq = part.find('=')?;
        if eq == 0 {
            return None;
        }
        keys.push(strip_emphasis(part[..eq].trim()));
        values.push(strip_emphasis(part[eq + 1..].trim()));
    }

    if keys.len() < 2 {
        return None;
    }
    Some((label, keys, values))
}

fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest;
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=3).contains(&digits) {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_table() {
        let lines = ["| Region | Sales |", "|---|:--:|", "| North | 120 |", "| South | 80 |"];
        let grid = parse_pipe_table(&lines).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[0], vec!["Region", "Sales"]);
        assert_eq!(grid.rows[2], vec!["South", "80"]);
    }

    #[test]
    fn test_pipe_table_needs_two_lines() {
        assert!(parse_pipe_table(&["| a | b |"]).is_none());
        assert!(parse_pipe_table(&["| a |", "| b |"]).is_none());
    }

    #[test]
    fn test_key_value_run() {
        let lines = [
            "<50字符：中性比例=35.8%，占比=0.7%",
            "50-100字符：中性比例=28.5%，占比=1.5%",
            "Next paragraph.",
        ];
        let (grid, consumed) = parse_key_value_run(&lines, "Category").unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(grid.rows[0], vec!["Category", "中性比例", "占比"]);
        assert_eq!(grid.rows[2], vec!["50-100字符", "28.5%", "1.5%"]);
    }

    #[test]
    fn test_key_value_without_label() {
        let lines = ["- a=1, b=2", "- a=3, b=4"];
        let (grid, consumed) = parse_key_value_run(&lines, "Category").unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(grid.rows[0], vec!["a", "b"]);
        assert_eq!(grid.rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_key_value_mismatched_keys() {
        let lines = ["x: a=1, b=2", "y: a=3, c=4"];
        assert!(parse_key_value_run(&lines, "Category").is_none());
    }

    #[test]
    fn test_key_value_rejects_prose() {
        assert!(extract_key_values("Revenue grew, costs fell").is_none());
        assert!(extract_key_values("only=1").is_none());
    }
}
