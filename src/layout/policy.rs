//! Flow policy: page geometry and pagination rules for one backend.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{BlockKind, StyleSheet};
use crate::text::WrapPolicy;

/// Page margins in backend units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
}

impl Margins {
    /// Create margins.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same margin on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(45.0, 45.0, 36.0, 36.0)
    }
}

/// Line heights per block kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineHeights {
    /// Paragraph and list item lines
    pub body: f32,
    /// Heading lines, levels 1-4
    pub headings: [f32; 4],
    /// Blank spacer
    pub blank: f32,
    /// Table rows
    pub table_row: f32,
    /// Table notes
    pub note: f32,
}

impl Default for LineHeights {
    fn default() -> Self {
        Self {
            body: 16.0,
            headings: [26.0, 24.0, 22.0, 16.0],
            blank: 8.0,
            table_row: 20.0,
            note: 14.0,
        }
    }
}

impl LineHeights {
    /// Same height for every kind (blank gets half).
    pub fn uniform(height: f32) -> Self {
        Self {
            body: height,
            headings: [height; 4],
            blank: height / 2.0,
            table_row: height,
            note: height,
        }
    }

    /// Get the line height for a block kind.
    pub fn for_kind(&self, kind: BlockKind) -> f32 {
        match kind {
            BlockKind::Heading(level) => self.headings[usize::from(level.clamp(1, 4)) - 1],
            BlockKind::Blank => self.blank,
            BlockKind::TableHeader | BlockKind::TableRow => self.table_row,
            BlockKind::Note => self.note,
            BlockKind::ListItem | BlockKind::Paragraph | BlockKind::Image => self.body,
        }
    }

    /// Largest configured line height.
    pub fn max(&self) -> f32 {
        self.headings
            .iter()
            .copied()
            .chain([self.body, self.blank, self.table_row, self.note])
            .fold(0.0, f32::max)
    }
}

/// Extra vertical space after some blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// After a heading
    pub after_heading: f32,
    /// After a table
    pub after_table: f32,
    /// After an image
    pub after_image: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_heading: 8.0,
            after_table: 16.0,
            after_image: 8.0,
        }
    }
}

/// Character budget for single-line table cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellBudget {
    /// Characters per backend unit of column width
    pub chars_per_unit: f32,
    /// Lower bound of the budget
    pub min_chars: usize,
    /// Upper bound of the budget
    pub max_chars: Option<usize>,
    /// Marker appended to truncated cells
    pub ellipsis: String,
}

impl Default for CellBudget {
    fn default() -> Self {
        Self {
            chars_per_unit: 0.18,
            min_chars: 4,
            max_chars: None,
            ellipsis: "..".to_string(),
        }
    }
}

impl CellBudget {
    /// Budget in characters for a column of the given width.
    pub fn chars_for(&self, column_width: f32) -> usize {
        let derived = (column_width * self.chars_per_unit).floor().max(0.0) as usize;
        let budget = derived.max(self.min_chars);
        match self.max_chars {
            Some(max) => budget.min(max),
            None => budget,
        }
    }
}

/// Pagination rules for one output medium.
///
/// Supplied once per render job and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowPolicy {
    /// Page width
    pub page_width: f32,

    /// Page height
    pub page_height: f32,

    /// Page margins
    pub margins: Margins,

    /// Line heights by block kind
    pub line_heights: LineHeights,

    /// Column width for wrapping text blocks
    pub wrap: WrapPolicy,

    /// Horizontal offset per list indent level
    pub indent_step: f32,

    /// Break after this many blocks on a page, regardless of space
    pub max_items_per_page: Option<usize>,

    /// Break after this many body rows of one table on a page
    pub max_rows_per_table_page: Option<usize>,

    /// Columns beyond this are dropped
    pub max_columns: Option<usize>,

    /// Body rows beyond this are dropped
    pub max_table_rows: Option<usize>,

    /// Vertical spacing after blocks
    pub spacing: Spacing,

    /// Default image height
    pub image_height: f32,

    /// Table cell truncation budget
    pub cell_budget: CellBudget,

    /// Emit a "rows x-y of n" note on every table fragment
    pub range_notes: bool,

    /// Styles attached to placed instructions
    pub styles: StyleSheet,
}

impl Default for FlowPolicy {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margins: Margins::default(),
            line_heights: LineHeights::default(),
            wrap: WrapPolicy::default(),
            indent_step: 20.0,
            max_items_per_page: None,
            max_rows_per_table_page: None,
            max_columns: None,
            max_table_rows: None,
            spacing: Spacing::default(),
            image_height: 350.0,
            cell_budget: CellBudget::default(),
            range_notes: false,
            styles: StyleSheet::default(),
        }
    }
}

impl FlowPolicy {
    /// Create a policy with defaults (A4 portrait, space-only pagination).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the line heights.
    pub fn with_line_heights(mut self, line_heights: LineHeights) -> Self {
        self.line_heights = line_heights;
        self
    }

    /// Set the wrap policy.
    pub fn with_wrap(mut self, wrap: WrapPolicy) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the list indent step.
    pub fn with_indent_step(mut self, step: f32) -> Self {
        self.indent_step = step;
        self
    }

    /// Cap the number of blocks per page.
    pub fn with_max_items_per_page(mut self, max: usize) -> Self {
        self.max_items_per_page = Some(max);
        self
    }

    /// Cap the number of table body rows per page.
    pub fn with_max_rows_per_table_page(mut self, max: usize) -> Self {
        self.max_rows_per_table_page = Some(max);
        self
    }

    /// Cap the number of table columns.
    pub fn with_max_columns(mut self, max: usize) -> Self {
        self.max_columns = Some(max);
        self
    }

    /// Cap the number of table body rows.
    pub fn with_max_table_rows(mut self, max: usize) -> Self {
        self.max_table_rows = Some(max);
        self
    }

    /// Set the spacing.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the default image height.
    pub fn with_image_height(mut self, height: f32) -> Self {
        self.image_height = height;
        self
    }

    /// Set the cell budget.
    pub fn with_cell_budget(mut self, budget: CellBudget) -> Self {
        self.cell_budget = budget;
        self
    }

    /// Enable or disable per-fragment table range notes.
    pub fn with_range_notes(mut self, enabled: bool) -> Self {
        self.range_notes = enabled;
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Height between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margins.top - self.margins.bottom
    }

    /// Lowest y a line may end at.
    pub fn bottom(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Check that the policy describes a usable page.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.page_width,
            self.page_height,
            self.margins.top,
            self.margins.bottom,
            self.margins.left,
            self.margins.right,
            self.indent_step,
            self.image_height,
        ];
        if finite.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidPolicy(
                "dimensions must be finite and non-negative".to_string(),
            ));
        }
        if self.content_height() <= 0.0 {
            return Err(Error::InvalidPolicy(format!(
                "page height {} leaves no content area",
                self.page_height
            )));
        }
        if self.content_width() <= 0.0 {
            return Err(Error::InvalidPolicy(format!(
                "page width {} leaves no content area",
                self.page_width
            )));
        }

        let lh = &self.line_heights;
        let heights = lh.headings.iter().chain([&lh.body, &lh.table_row, &lh.note]);
        if heights.copied().any(|h| !h.is_finite() || h <= 0.0)
            || !lh.blank.is_finite()
            || lh.blank < 0.0
        {
            return Err(Error::InvalidPolicy(
                "line heights must be positive".to_string(),
            ));
        }

        if self.wrap.max_width == 0 {
            return Err(Error::InvalidPolicy("wrap width must be at least 1".to_string()));
        }

        let limits = [
            ("max_items_per_page", self.max_items_per_page),
            ("max_rows_per_table_page", self.max_rows_per_table_page),
            ("max_columns", self.max_columns),
        ];
        for (name, limit) in limits {
            if limit == Some(0) {
                return Err(Error::InvalidPolicy(format!("{} must be at least 1", name)));
            }
        }

        Ok(())
    }

    /// Overlay the fields of a JSON object onto this policy.
    ///
    /// Nested objects such as `margins` merge key by key and `null` clears
    /// an optional limit. The merged policy is validated.
    pub fn with_json_overrides(&self, json: &str) -> Result<Self> {
        let overrides: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidPolicy(e.to_string()))?;
        let mut merged = serde_json::to_value(self)?;
        merge_json(&mut merged, overrides);

        let policy: Self =
            serde_json::from_value(merged).map_err(|e| Error::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read a JSON override file and overlay it onto this policy.
    pub fn load_overrides(&self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("applying policy overrides from {}", path.display());
        self.with_json_overrides(&json)
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
