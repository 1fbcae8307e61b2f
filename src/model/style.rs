//! Visual styles attached to placed instructions.

use super::BlockKind;
use serde::{Deserialize, Serialize};

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// White.
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

/// Text styling for one placed run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f32,

    /// Bold weight
    pub bold: bool,

    /// Text colour
    pub color: Rgb,

    /// Background fill drawn behind the run
    pub fill: Option<Rgb>,
}

impl TextStyle {
    /// Create a plain style with the given font size.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            bold: false,
            color: Rgb::BLACK,
            fill: None,
        }
    }

    /// Make the style bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the text colour.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set a background fill.
    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(11.0)
    }
}

/// Styles per block kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Paragraphs and list items
    pub body: TextStyle,

    /// Heading levels 1-4
    pub headings: [TextStyle; 4],

    /// Table header cells
    pub table_header: TextStyle,

    /// Table body cells
    pub table_row: TextStyle,

    /// Table range and truncation notes
    pub note: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let heading_color = Rgb(31, 56, 100);
        Self {
            body: TextStyle::new(11.0),
            headings: [
                TextStyle::new(18.0).bold().with_color(heading_color),
                TextStyle::new(16.0).bold().with_color(heading_color),
                TextStyle::new(14.0).bold().with_color(heading_color),
                TextStyle::new(12.0).bold(),
            ],
            table_header: TextStyle::new(10.0)
                .bold()
                .with_color(Rgb::WHITE)
                .with_fill(Rgb(68, 114, 196)),
            table_row: TextStyle::new(10.0),
            note: TextStyle::new(9.0).with_color(Rgb(128, 128, 128)),
        }
    }
}

impl StyleSheet {
    /// Get the style for a block kind.
    pub fn for_kind(&self, kind: BlockKind) -> TextStyle {
        match kind {
            BlockKind::Heading(level) => {
                let index = usize::from(level.clamp(1, 4)) - 1;
                self.headings[index]
            }
            BlockKind::TableHeader => self.table_header,
            BlockKind::TableRow => self.table_row,
            BlockKind::Note => self.note,
            BlockKind::ListItem | BlockKind::Paragraph | BlockKind::Blank | BlockKind::Image => {
                self.body
            }
        }
    }

    /// Scale every font size by a factor.
    pub fn scaled(mut self, factor: f32) -> Self {
        let scale = |style: &mut TextStyle| style.font_size *= factor;
        scale(&mut self.body);
        self.headings.iter_mut().for_each(scale);
        scale(&mut self.table_header);
        scale(&mut self.table_row);
        scale(&mut self.note);
        self
    }
}
