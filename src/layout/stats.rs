//! Statistics collected while flowing a block stream.

use serde::{Deserialize, Serialize};

use crate::model::ContentBlock;

/// Counters for one render job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStats {
    /// Pages or slides used
    pub page_count: u32,

    /// Page-break instructions emitted
    pub page_break_count: u32,

    /// Headings placed
    pub heading_count: u32,

    /// Paragraphs placed
    pub paragraph_count: u32,

    /// List items placed
    pub list_item_count: u32,

    /// Tables placed
    pub table_count: u32,

    /// Table body rows placed
    pub table_row_count: u32,

    /// Header rows re-emitted after a mid-table break
    pub repeated_header_count: u32,

    /// Tables that lost rows or columns to a cap
    pub truncated_table_count: u32,

    /// Images placed
    pub image_count: u32,

    /// Text lines placed
    pub line_count: u32,

    /// Non-whitespace characters placed as text lines
    pub char_count: u32,
}

impl FlowStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a placed block by kind.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Heading { .. } => self.heading_count += 1,
            ContentBlock::ListItem { .. } => self.list_item_count += 1,
            ContentBlock::Paragraph { .. } => self.paragraph_count += 1,
            ContentBlock::Table(_) => self.table_count += 1,
            ContentBlock::Image(_) => self.image_count += 1,
            ContentBlock::Blank => {}
        }
    }

    /// Count one placed text line.
    pub fn add_line(&mut self, text: &str) {
        self.line_count += 1;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Increment page break count.
    pub fn add_page_break(&mut self) {
        self.page_break_count += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &FlowStats) {
        self.page_count += other.page_count;
        self.page_break_count += other.page_break_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.repeated_header_count += other.repeated_header_count;
        self.truncated_table_count += other.truncated_table_count;
        self.image_count += other.image_count;
        self.line_count += other.line_count;
        self.char_count += other.char_count;
    }
}
