//! Line-oriented markdown subset parser.
//!
//! Handles headings (`#` to `####`), bullet and numbered list items, blank
//! lines, code fences (dropped) and plain paragraphs. Inline `**`/`__`
//! emphasis is removed. Optionally recognizes pipe tables and key=value runs.

use regex::Regex;

use crate::model::ContentBlock;

use super::options::ParseOptions;
use super::text_table::{is_pipe_line, parse_key_value_run, parse_pipe_table};

const FENCE: &str = "```";

/// Heading prefixes, most specific first.
const HEADING_PREFIXES: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

/// Parser from cleaned narrative text to content blocks.
pub struct MarkdownBlockParser {
    options: ParseOptions,
    ordered_item: Regex,
}

impl MarkdownBlockParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ordered_item: Regex::new(r"^[0-9]+(?:\. |、|\) )").expect("ordered item pattern is valid"),
        }
    }

    /// Get the parser options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse text into blocks in source order.
    pub fn parse(&self, text: &str) -> Vec<ContentBlock> {
        let lines: Vec<&str> = text.lines().collect();
        let last_fence = lines.iter().rposition(|line| is_fence(line));

        let mut blocks = Vec::new();
        let mut in_fence = false;
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if is_fence(line) {
                if in_fence {
                    in_fence = false;
                } else if last_fence.is_some_and(|last| last > i) {
                    in_fence = true;
                } else {
                    log::debug!("Skipping unterminated code fence at line {}", i + 1);
                }
                i += 1;
                continue;
            }
            if in_fence {
                i += 1;
                continue;
            }

            if line.trim().is_empty() {
                let repeated = matches!(blocks.last(), Some(ContentBlock::Blank));
                if !(repeated && self.options.collapse_blank_lines) {
                    blocks.push(ContentBlock::Blank);
                }
                i += 1;
                continue;
            }

            if let Some((block, consumed)) = self.parse_table_lines(&lines[i..]) {
                blocks.push(block);
                i += consumed;
                continue;
            }

            blocks.push(self.parse_line(line));
            i += 1;
        }

        blocks
    }

    /// Parse a single non-blank line.
    pub fn parse_line(&self, line: &str) -> ContentBlock {
        let leading = line.chars().take_while(|c| c.is_whitespace()).count();
        let indent = leading / 2;
        let content = line.trim();

        for (prefix, level) in HEADING_PREFIXES {
            if let Some(rest) = content.strip_prefix(prefix) {
                return ContentBlock::heading(level, strip_emphasis(rest.trim()));
            }
        }

        if let Some(rest) = content.strip_prefix("- ").or_else(|| content.strip_prefix("* ")) {
            let text = format!("{} {}", self.options.bullet_glyph, strip_emphasis(rest.trim()));
            return ContentBlock::bullet(indent, text);
        }

        if self.ordered_item.is_match(content) {
            return ContentBlock::numbered(indent, strip_emphasis(content));
        }

        ContentBlock::paragraph(strip_emphasis(content))
    }

    fn parse_table_lines(&self, lines: &[&str]) -> Option<(ContentBlock, usize)> {
        if self.options.detect_pipe_tables && is_pipe_line(lines[0]) {
            let run = lines.iter().take_while(|line| is_pipe_line(line)).count();
            if let Some(grid) = parse_pipe_table(&lines[..run]) {
                log::trace!("Pipe table with {} rows", grid.row_count());
                return Some((ContentBlock::Table(grid), run));
            }
        }

        if self.options.detect_key_value_tables {
            if let Some((grid, consumed)) = parse_key_value_run(lines, &self.options.label_header) {
                log::trace!("Key-value table with {} rows", grid.row_count());
                return Some((ContentBlock::Table(grid), consumed));
            }
        }

        None
    }
}

impl Default for MarkdownBlockParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Remove `**` and then `__` emphasis delimiters, keeping the content.
///
/// Pairs are removed from the first occurrence onward; an unpaired
/// delimiter is left as is.
pub fn strip_emphasis(text: &str) -> String {
    let mut result = text.to_string();
    for delimiter in ["**", "__"] {
        while let Some(start) = result.find(delimiter) {
            let inner_start = start + delimiter.len();
            let Some(len) = result[inner_start..].find(delimiter) else {
                break;
            };
            let inner_end = inner_start + len;
            result.replace_range(inner_end..inner_end + delimiter.len(), "");
            result.replace_range(start..inner_start, "");
        }
    }
    result
}
