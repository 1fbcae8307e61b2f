//! Placed render instructions produced by the flow engine.

use super::{BlockKind, TextStyle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One positioned piece of output.
///
/// Coordinates are absolute backend units measured from the top-left corner
/// of the page or slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstruction {
    /// Page or slide index (0-based)
    pub page: usize,

    /// Left edge
    pub x: f32,

    /// Top edge
    pub y: f32,

    /// What to draw
    pub content: InstructionContent,

    /// How to draw it
    pub style: TextStyle,
}

impl PlacedInstruction {
    /// Check if this instruction starts a new page.
    pub fn is_page_break(&self) -> bool {
        matches!(self.content, InstructionContent::PageBreak)
    }

    /// Get the text of a text-line instruction.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            InstructionContent::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Content of a placed instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstructionContent {
    /// Start a new page or slide
    PageBreak,

    /// One wrapped line of a textual block
    Text {
        /// Kind of the originating block
        kind: BlockKind,
        /// Line text
        text: String,
    },

    /// One table row, already column-capped and budget-truncated
    TableRow {
        /// Cell texts (padded to the column count)
        cells: Vec<String>,
        /// Whether this is the header row (first or repeated)
        header: bool,
        /// Width of each column
        column_width: f32,
        /// Row height
        height: f32,
        /// Row index in the source grid (0 = header)
        index: usize,
    },

    /// An image
    Image {
        /// Opaque source passed through from the block
        source: String,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },

    /// Rows shown on this fragment and truncation state
    TableNote(TableNote),
}

/// Continuation and truncation information for a table fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNote {
    /// First body row shown (1-based)
    pub first_row: usize,

    /// Last body row shown (1-based, inclusive)
    pub last_row: usize,

    /// Body rows in the source grid
    pub total_rows: usize,

    /// Whether body rows were dropped by the row cap
    pub rows_truncated: bool,

    /// Whether columns were dropped by the column cap
    pub columns_truncated: bool,
}

impl fmt::Display for TableNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rows {}-{} of {}",
            self.first_row, self.last_row, self.total_rows
        )?;
        if self.columns_truncated {
            write!(f, " (columns truncated)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_note_display() {
        let note = TableNote {
            first_row: 1,
            last_row: 14,
            total_rows: 40,
            rows_truncated: false,
            columns_truncated: true,
        };
        assert_eq!(note.to_string(), "Rows 1-14 of 40 (columns truncated)");

        let note = TableNote {
            columns_truncated: false,
            ..note
        };
        assert_eq!(note.to_string(), "Rows 1-14 of 40");
    }

    #[test]
    fn test_instruction_helpers() {
        let line = PlacedInstruction {
            page: 0,
            x: 36.0,
            y: 45.0,
            content: InstructionContent::Text {
                kind: BlockKind::Paragraph,
                text: "Hello".to_string(),
            },
            style: TextStyle::default(),
        };
        assert_eq!(line.text(), Some("Hello"));
        assert!(!line.is_page_break());
    }
}
