//! Boundary between placed instructions and drawing backends.

use crate::error::Result;
use crate::layout::FlowOutput;
use crate::model::{InstructionContent, Rgb, TextStyle};

/// Horizontal padding inside a table cell.
const CELL_PADDING: f32 = 4.0;

/// A drawing surface for one output format.
///
/// Coordinates are absolute backend units from the top-left corner of the
/// current page. Calls are synchronous; an error aborts the replay.
pub trait RenderBackend {
    /// Begin page or slide `index` (0-based). Called once for page 0 before
    /// anything is drawn.
    fn start_new_page(&mut self, index: usize) -> Result<()>;

    /// Draw one run of text.
    fn draw_text_run(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) -> Result<()>;

    /// Fill a rectangle.
    fn draw_filled_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb)
        -> Result<()>;

    /// Draw an image from an opaque source.
    fn draw_image(&mut self, x: f32, y: f32, width: f32, height: f32, source: &str)
        -> Result<()>;
}

/// Drive a backend from flow output.
pub fn replay(output: &FlowOutput, backend: &mut dyn RenderBackend) -> Result<()> {
    backend.start_new_page(0)?;

    for instruction in &output.instructions {
        let (x, y, style) = (instruction.x, instruction.y, &instruction.style);
        match &instruction.content {
            InstructionContent::PageBreak => backend.start_new_page(instruction.page)?,
            InstructionContent::Text { text, .. } => {
                backend.draw_text_run(x, y, text, style)?;
            }
            InstructionContent::TableRow {
                cells,
                column_width,
                height,
                ..
            } => {
                for (i, cell) in cells.iter().enumerate() {
                    let cell_x = x + i as f32 * column_width;
                    if let Some(fill) = style.fill {
                        backend.draw_filled_rect(cell_x, y, *column_width, *height, fill)?;
                    }
                    if !cell.is_empty() {
                        backend.draw_text_run(cell_x + CELL_PADDING, y, cell, style)?;
                    }
                }
            }
            InstructionContent::Image {
                source,
                width,
                height,
            } => backend.draw_image(x, y, *width, *height, source)?,
            InstructionContent::TableNote(note) => {
                backend.draw_text_run(x, y, &note.to_string(), style)?;
            }
        }
    }

    Ok(())
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `start_new_page`
    NewPage(usize),
    /// `draw_text_run`
    Text {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Text
        text: String,
    },
    /// `draw_filled_rect`
    Rect {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill colour
        color: Rgb,
    },
    /// `draw_image`
    Image {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Source
        source: String,
    },
}

/// Backend that records every call, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of pages started.
    pub fn page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::NewPage(_)))
            .count()
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn start_new_page(&mut self, index: usize) -> Result<()> {
        self.calls.push(BackendCall::NewPage(index));
        Ok(())
    }

    fn draw_text_run(&mut self, x: f32, y: f32, text: &str, _style: &TextStyle) -> Result<()> {
        self.calls.push(BackendCall::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_filled_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    ) -> Result<()> {
        self.calls.push(BackendCall::Rect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        x: f32,
        y: f32,
        _width: f32,
        _height: f32,
        source: &str,
    ) -> Result<()> {
        self.calls.push(BackendCall::Image {
            x,
            y,
            source: source.to_string(),
        });
        Ok(())
    }
}
