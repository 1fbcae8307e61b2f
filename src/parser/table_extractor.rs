//! Recovery of tables embedded in narrative text.
//!
//! Two encodings are recognized: a fenced block opened by a table marker
//! (```` ```json:table ````) and a bare two-dimensional bracket literal
//! such as `[["Region","Sales"],["North","120"]]`. Both are removed from the
//! text; nothing here ever fails, a candidate that does not parse is left
//! in place as plain text.

use crate::model::TableGrid;

use super::bracket::{find_matching_bracket, find_outer_array_start_from};

/// Configuration for table extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Marker that opens a fenced table block
    pub fence_marker: String,

    /// Marker that closes a fenced table block
    pub fence_end: String,

    /// Text that replaces an accepted bare literal
    pub placeholder: String,

    /// Bare candidates longer than this (in characters) are skipped
    pub max_candidate_len: usize,

    /// Bare candidates spanning more line breaks than this are skipped
    pub max_candidate_lines: usize,

    /// Allowed column-count difference between the header and other rows
    pub column_tolerance: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fence_marker: "```json:table".to_string(),
            fence_end: "```".to_string(),
            placeholder: "(table data extracted)".to_string(),
            max_candidate_len: 10_000,
            max_candidate_lines: 100,
            column_tolerance: 1,
        }
    }
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fence opening marker.
    pub fn with_fence_marker(mut self, marker: impl Into<String>) -> Self {
        self.fence_marker = marker.into();
        self
    }

    /// Set the placeholder for accepted bare literals.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the bare candidate size limits.
    pub fn with_candidate_limits(mut self, max_len: usize, max_lines: usize) -> Self {
        self.max_candidate_len = max_len;
        self.max_candidate_lines = max_lines;
        self
    }

    /// Set the column tolerance for bare literals.
    pub fn with_column_tolerance(mut self, tolerance: usize) -> Self {
        self.column_tolerance = tolerance;
        self
    }
}

/// Removes fenced and bare table encodings from narrative text.
#[derive(Debug, Clone, Default)]
pub struct TableBlockExtractor {
    options: ExtractOptions,
}

impl TableBlockExtractor {
    /// Create a new extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the extractor options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract all tables, returning the cleaned text and the grids in the
    /// order they were found (fenced tables first).
    pub fn extract(&self, raw: &str) -> (String, Vec<TableGrid>) {
        let mut text = raw.to_string();
        let mut grids = Vec::new();

        self.extract_fenced(&mut text, &mut grids);
        self.extract_bare(&mut text, &mut grids);

        (text, grids)
    }

    fn extract_fenced(&self, text: &mut String, grids: &mut Vec<TableGrid>) {
        let marker = self.options.fence_marker.as_str();
        let fence_end = self.options.fence_end.as_str();
        if marker.is_empty() || fence_end.is_empty() {
            return;
        }

        let mut search_from = 0;
        while let Some(found) = text[search_from..].find(marker) {
            let start = search_from + found;
            let body_start = start + marker.len();

            let Some(body_len) = text[body_start..].find(fence_end) else {
                log::debug!("Unterminated table fence at byte {}", start);
                break;
            };
            let body_end = body_start + body_len;

            let grid = parse_grid(&text[body_start..body_end]);
            if grid.is_empty() {
                log::debug!("Fenced table at byte {} has no rows", start);
            } else {
                log::debug!(
                    "Extracted fenced table: {} rows x {} columns",
                    grid.row_count(),
                    grid.column_count()
                );
                grids.push(grid);
            }

            text.replace_range(start..body_end + fence_end.len(), "");
            search_from = start;
        }
    }

    fn extract_bare(&self, text: &mut String, grids: &mut Vec<TableGrid>) {
        let mut pos = 0;

        while let Some(start) = find_outer_array_start_from(text, pos) {
            let Some(end) = find_matching_bracket(text, start) else {
                log::debug!("Unterminated array literal at byte {}", start);
                break;
            };

            let candidate = &text[start..=end];
            if candidate.chars().count() > self.options.max_candidate_len
                || candidate.matches('\n').count() > self.options.max_candidate_lines
            {
                log::debug!("Skipping oversized array literal at byte {}", start);
                pos = start + 1;
                continue;
            }

            let grid = parse_grid(candidate);
            if !grid.is_plausible(self.options.column_tolerance) {
                log::trace!("Rejected array literal at byte {}", start);
                pos = start + 1;
                continue;
            }

            log::debug!(
                "Extracted bare table: {} rows x {} columns",
                grid.row_count(),
                grid.column_count()
            );
            text.replace_range(start..=end, &self.options.placeholder);
            grids.push(grid);
            pos = start + self.options.placeholder.len();
        }
    }
}

/// Extract tables with default options.
pub fn extract_tables(raw: &str) -> (String, Vec<TableGrid>) {
    TableBlockExtractor::new().extract(raw)
}

/// Parse a bracketed grid literal into rows of cells.
///
/// One outer `[...]` layer is stripped; each balanced `[...]` span inside it
/// is a row. Returns an empty grid when the input is not bracketed.
pub fn parse_grid(body: &str) -> TableGrid {
    let trimmed = body.trim();
    let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return TableGrid::default();
    };

    let mut rows = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pos = 0;

    while let Some(ch) = inner[pos..].chars().next() {
        let next = pos + ch.len_utf8();

        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            pos = next;
            continue;
        }

        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' => {
                let Some(end) = find_matching_bracket(inner, pos) else {
                    break;
                };
                rows.push(parse_row(&inner[pos + 1..end]));
                pos = end + 1;
                continue;
            }
            _ => {}
        }
        pos = next;
    }

    TableGrid::new(rows)
}

/// Split one row body on commas outside quotes.
fn parse_row(row: &str) -> Vec<String> {
    if row.trim().is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in row.chars() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            current.push(ch);
            continue;
        }

        match ch {
            ',' => cells.push(clean_cell(&std::mem::take(&mut current))),
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    cells.push(clean_cell(&current));

    cells
}

/// Trim a cell and strip one layer of matching quotes.
fn clean_cell(raw: &str) -> String {
    let cell = raw.trim();
    for quote in ['"', '\''] {
        if cell.len() >= 2 && cell.starts_with(quote) && cell.ends_with(quote) {
            return unescape(&cell[1..cell.len() - 1]);
        }
    }
    cell.to_string()
}

fn unescape(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
