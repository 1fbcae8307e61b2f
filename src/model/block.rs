//! Content block types.

use super::TableGrid;
use serde::{Deserialize, Serialize};

/// One typed unit of parsed narrative.
///
/// Blocks are produced in source order by the parser and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A heading (level 1-4)
    Heading {
        /// Heading level
        level: u8,
        /// Heading text without the `#` prefix
        text: String,
    },

    /// A list item
    ListItem {
        /// Whether the item is numbered
        ordered: bool,
        /// Nesting level (leading whitespace / 2)
        indent: usize,
        /// Item text, including the bullet glyph or number
        text: String,
    },

    /// A paragraph of prose
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Vertical spacing between blocks
    Blank,

    /// A table recovered from the narrative
    Table(TableGrid),

    /// A chart or picture supplied by the caller
    Image(ImageBlock),
}

impl ContentBlock {
    /// Create a heading block. The level is clamped to 1-4.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentBlock::Heading {
            level: level.clamp(1, 4),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Create an unordered list item.
    pub fn bullet(indent: usize, text: impl Into<String>) -> Self {
        ContentBlock::ListItem {
            ordered: false,
            indent,
            text: text.into(),
        }
    }

    /// Create an ordered list item.
    pub fn numbered(indent: usize, text: impl Into<String>) -> Self {
        ContentBlock::ListItem {
            ordered: true,
            indent,
            text: text.into(),
        }
    }

    /// Get the kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading { level, .. } => BlockKind::Heading(*level),
            ContentBlock::ListItem { .. } => BlockKind::ListItem,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Blank => BlockKind::Blank,
            ContentBlock::Table(_) => BlockKind::TableRow,
            ContentBlock::Image(_) => BlockKind::Image,
        }
    }

    /// Get the text of a textual block.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Heading { text, .. }
            | ContentBlock::ListItem { text, .. }
            | ContentBlock::Paragraph { text } => Some(text),
            _ => None,
        }
    }

    /// Get the list indent level (0 for non-list blocks).
    pub fn indent(&self) -> usize {
        match self {
            ContentBlock::ListItem { indent, .. } => *indent,
            _ => 0,
        }
    }

    /// Check if this block is a blank spacer.
    pub fn is_blank(&self) -> bool {
        matches!(self, ContentBlock::Blank)
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading { .. })
    }
}

/// Kind of placed content, used for line heights and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Heading with level
    Heading(u8),
    /// List item
    ListItem,
    /// Paragraph
    Paragraph,
    /// Blank spacer
    Blank,
    /// Table header row
    TableHeader,
    /// Table body row
    TableRow,
    /// Image
    Image,
    /// Table range or truncation note
    Note,
}

/// An image placed into the flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Opaque source handed back to the backend (path, data URI, chart id)
    pub source: String,

    /// Caption drawn above the image
    pub caption: Option<String>,

    /// Height in backend units (policy default when `None`)
    pub height: Option<f32>,
}

impl ImageBlock {
    /// Create an image block from a source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            caption: None,
            height: None,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set an explicit height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}
