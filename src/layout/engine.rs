//! The page flow engine.
//!
//! Blocks are placed top to bottom in a single column. A page break happens
//! when the next piece does not fit above the bottom margin (space policy),
//! or when a per-page block or table-row cap is reached (count policy). A
//! page that has nothing drawn on it is never broken.

use crate::error::Result;
use crate::model::{
    BlockKind, ContentBlock, ImageBlock, InstructionContent, PlacedInstruction, TableGrid,
    TableNote, TextStyle,
};
use crate::text::{truncate_to_budget, wrap_with};

use super::cursor::Cursor;
use super::listener::{FlowAction, FlowListener};
use super::{FlowOutput, FlowPolicy, FlowStats};

/// How a multi-line text block is put on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPlacement {
    /// All lines on one page; break first if they do not fit.
    Atomic,
    /// Each line checked on its own; the block may continue on the next page.
    LineByLine,
}

/// Decide how to place a text block of the given total height.
///
/// Headings and list items are kept together unless they are taller than a
/// whole content area; paragraphs always flow.
pub fn decide_placement(kind: BlockKind, height: f32, content_height: f32) -> TextPlacement {
    let keep_together = matches!(kind, BlockKind::Heading(_) | BlockKind::ListItem);
    if keep_together && height <= content_height {
        TextPlacement::Atomic
    } else {
        TextPlacement::LineByLine
    }
}

/// Turns a block stream into placed, paginated instructions.
pub struct PageFlowEngine<'l> {
    policy: FlowPolicy,
    cursor: Cursor,
    instructions: Vec<PlacedInstruction>,
    stats: FlowStats,
    listener: Option<&'l mut dyn FlowListener>,
}

impl<'l> PageFlowEngine<'l> {
    /// Create an engine for one render job.
    ///
    /// Fails only when the policy is invalid.
    pub fn new(policy: &FlowPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            policy: policy.clone(),
            cursor: Cursor::new(policy.margins.top),
            instructions: Vec::new(),
            stats: FlowStats::new(),
            listener: None,
        })
    }

    /// Attach a listener for break, header and placement callbacks.
    pub fn with_listener(mut self, listener: &'l mut dyn FlowListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Get the policy.
    pub fn policy(&self) -> &FlowPolicy {
        &self.policy
    }

    /// Get the current cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Place one block.
    pub fn place(&mut self, block: &ContentBlock) {
        let action = match self.listener.as_deref_mut() {
            Some(listener) => listener.before_block(block),
            None => FlowAction::Continue,
        };
        let replacement;
        let block = match action {
            FlowAction::Continue => block,
            FlowAction::Skip => return,
            FlowAction::Replace(other) => {
                replacement = other;
                &replacement
            }
        };

        match block {
            ContentBlock::Blank => self.place_blank(),
            ContentBlock::Heading { text, .. } => {
                self.place_text(block.kind(), text, 0);
                self.cursor.skip(self.policy.spacing.after_heading);
            }
            ContentBlock::ListItem { indent, text, .. } => {
                self.place_text(BlockKind::ListItem, text, *indent)
            }
            ContentBlock::Paragraph { text } => self.place_text(BlockKind::Paragraph, text, 0),
            ContentBlock::Table(grid) => self.place_table(grid),
            ContentBlock::Image(image) => self.place_image(image),
        }

        self.stats.add_block(block);
        let page = self.cursor.page;
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.on_block_placed(block, page);
        }
    }

    /// Place blocks in order.
    pub fn place_all<'b>(&mut self, blocks: impl IntoIterator<Item = &'b ContentBlock>) {
        for block in blocks {
            self.place(block);
        }
    }

    /// Finish the job and return the placed instructions.
    pub fn finish(mut self) -> FlowOutput {
        let page_count = self.cursor.page + 1;
        self.stats.page_count = page_count as u32;
        log::debug!(
            "Flowed {} instructions onto {} pages",
            self.instructions.len(),
            page_count
        );
        FlowOutput {
            instructions: self.instructions,
            page_count,
            stats: self.stats,
        }
    }

    fn place_blank(&mut self) {
        if !self.cursor.is_fresh() {
            self.cursor.skip(self.policy.line_heights.blank);
        }
    }

    fn place_text(&mut self, kind: BlockKind, text: &str, indent: usize) {
        let line_height = self.policy.line_heights.for_kind(kind);
        let x = self.policy.margins.left + indent as f32 * self.policy.indent_step;
        let style = self.policy.styles.for_kind(kind);

        let mut lines = wrap_with(text, &self.policy.wrap);
        if lines.is_empty() {
            lines.push(String::new());
        }
        let height = line_height * lines.len() as f32;

        self.enforce_item_limit();
        let placement = decide_placement(kind, height, self.policy.content_height());
        if placement == TextPlacement::Atomic {
            self.ensure_space(height);
        }

        let mut counted_page = None;
        for line in lines {
            if placement == TextPlacement::LineByLine {
                self.ensure_space(line_height);
            }
            if counted_page != Some(self.cursor.page) {
                counted_page = Some(self.cursor.page);
                self.cursor.items_on_page += 1;
            }
            self.stats.add_line(&line);
            self.emit(x, line_height, InstructionContent::Text { kind, text: line }, style);
        }
    }

    fn place_image(&mut self, image: &ImageBlock) {
        let height = image.height.unwrap_or(self.policy.image_height);
        let caption_height = self.policy.line_heights.body;
        let total = height + image.caption.as_ref().map_or(0.0, |_| caption_height);
        let x = self.policy.margins.left;

        self.enforce_item_limit();
        self.ensure_space(total);

        if let Some(caption) = &image.caption {
            let style = self.policy.styles.for_kind(BlockKind::Paragraph);
            let content = InstructionContent::Text {
                kind: BlockKind::Paragraph,
                text: caption.clone(),
            };
            self.stats.add_line(caption);
            self.emit(x, caption_height, content, style);
        }

        let content = InstructionContent::Image {
            source: image.source.clone(),
            width: self.policy.content_width(),
            height,
        };
        self.emit(x, height, content, self.policy.styles.body);
        self.cursor.items_on_page += 1;
        self.cursor.skip(self.policy.spacing.after_image);
    }

    fn place_table(&mut self, grid: &TableGrid) {
        let total_columns = grid.column_count();
        if total_columns == 0 {
            return;
        }
        let columns = self
            .policy
            .max_columns
            .map_or(total_columns, |max| total_columns.min(max));
        let body = grid.body();
        let total_rows = body.len();
        let shown_rows = self
            .policy
            .max_table_rows
            .map_or(total_rows, |max| total_rows.min(max));

        let layout = TableLayout {
            columns,
            column_width: self.policy.content_width() / columns as f32,
            row_height: self.policy.line_heights.table_row,
            columns_truncated: columns < total_columns,
            rows_truncated: shown_rows < total_rows,
            total_rows,
        };
        let budget = self.policy.cell_budget.chars_for(layout.column_width);
        let header = self.prepare_cells(grid.header().unwrap_or_default(), columns, budget);

        if layout.columns_truncated || layout.rows_truncated {
            self.stats.truncated_table_count += 1;
        }

        // The row cap applies per table fragment.
        self.cursor.rows_on_page = 0;

        // Keep the header with the first body row.
        self.enforce_item_limit();
        let keep = layout.row_height * if shown_rows > 0 { 2.0 } else { 1.0 };
        self.ensure_space(keep);
        self.emit_header(&header, &layout, false);

        let mut fragment_first = 1;
        for (i, row) in body[..shown_rows].iter().enumerate() {
            let row_number = i + 1;
            let row_cap_hit = self
                .policy
                .max_rows_per_table_page
                .is_some_and(|max| self.cursor.rows_on_page >= max);
            let space_hit = self.cursor.y + layout.row_height > self.policy.bottom();

            if row_cap_hit || space_hit {
                if self.policy.range_notes {
                    self.emit_note(&layout, fragment_first, row_number - 1, false);
                }
                self.break_page();
                self.emit_header(&header, &layout, true);
                fragment_first = row_number;
            }

            let cells = self.prepare_cells(row, columns, budget);
            self.emit_row(cells, false, row_number, &layout);
            self.cursor.rows_on_page += 1;
            self.stats.table_row_count += 1;
        }

        if self.policy.range_notes && shown_rows > 0 {
            self.emit_note(&layout, fragment_first, shown_rows, true);
        } else if layout.columns_truncated || layout.rows_truncated {
            self.emit_note(&layout, 1, shown_rows, true);
        }

        self.cursor.skip(self.policy.spacing.after_table);
    }

    fn prepare_cells(&self, row: &[String], columns: usize, budget: usize) -> Vec<String> {
        let ellipsis = self.policy.cell_budget.ellipsis.as_str();
        (0..columns)
            .map(|i| {
                row.get(i)
                    .map(|cell| truncate_to_budget(cell, budget, ellipsis))
                    .unwrap_or_default()
            })
            .collect()
    }

    fn emit_header(&mut self, cells: &[String], layout: &TableLayout, repeated: bool) {
        self.emit_row(cells.to_vec(), true, 0, layout);
        self.cursor.items_on_page += 1;
        if repeated {
            self.stats.repeated_header_count += 1;
        }
        let page = self.cursor.page;
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.on_table_header(page, repeated);
        }
    }

    fn emit_row(&mut self, cells: Vec<String>, header: bool, index: usize, layout: &TableLayout) {
        let kind = if header {
            BlockKind::TableHeader
        } else {
            BlockKind::TableRow
        };
        let style = self.policy.styles.for_kind(kind);
        let content = InstructionContent::TableRow {
            cells,
            header,
            column_width: layout.column_width,
            height: layout.row_height,
            index,
        };
        self.emit(self.policy.margins.left, layout.row_height, content, style);
    }

    fn emit_note(&mut self, layout: &TableLayout, first_row: usize, last_row: usize, last: bool) {
        let note = TableNote {
            first_row,
            last_row,
            total_rows: layout.total_rows,
            rows_truncated: last && layout.rows_truncated,
            columns_truncated: layout.columns_truncated,
        };
        let height = self.policy.line_heights.note;
        let style = self.policy.styles.note;
        self.emit(
            self.policy.margins.left,
            height,
            InstructionContent::TableNote(note),
            style,
        );
    }

    /// Break before the next block when the page holds its maximum.
    fn enforce_item_limit(&mut self) {
        if let Some(max) = self.policy.max_items_per_page {
            if self.cursor.items_on_page >= max && !self.cursor.is_fresh() {
                self.break_page();
            }
        }
    }

    /// Break when `height` does not fit above the bottom margin.
    fn ensure_space(&mut self, height: f32) {
        if self.cursor.y + height > self.policy.bottom() && !self.cursor.is_fresh() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.cursor.next_page(self.policy.margins.top);
        let page = self.cursor.page;
        log::trace!("Page break to page {}", page);

        self.instructions.push(PlacedInstruction {
            page,
            x: self.policy.margins.left,
            y: self.policy.margins.top,
            content: InstructionContent::PageBreak,
            style: TextStyle::default(),
        });
        self.stats.add_page_break();

        if let Some(listener) = self.listener.as_deref_mut() {
            listener.on_page_break(page);
        }
    }

    fn emit(&mut self, x: f32, height: f32, content: InstructionContent, style: TextStyle) {
        self.instructions.push(PlacedInstruction {
            page: self.cursor.page,
            x,
            y: self.cursor.y,
            content,
            style,
        });
        self.cursor.advance(height);
    }
}

/// Per-table geometry computed once.
struct TableLayout {
    columns: usize,
    column_width: f32,
    row_height: f32,
    columns_truncated: bool,
    rows_truncated: bool,
    total_rows: usize,
}
