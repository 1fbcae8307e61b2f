//! Flowing word-processor document (DOCX) adapter.

use crate::layout::{CellBudget, FlowPolicy, LineHeights, Margins};
use crate::text::WrapPolicy;

use super::FormatAdapter;

/// A4 pages with one-inch margins.
///
/// Tables keep at most fifty body rows and cells are capped at fifty
/// characters.
#[derive(Debug, Clone, Default)]
pub struct FlowingDocumentAdapter {
    _private: (),
}

impl FlowingDocumentAdapter {
    /// Create a new flowing document adapter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FormatAdapter for FlowingDocumentAdapter {
    fn name(&self) -> &str {
        "document"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx", "doc"]
    }

    fn description(&self) -> &str {
        "A4 word-processor pages, 50-row tables"
    }

    fn policy(&self) -> FlowPolicy {
        FlowPolicy::new()
            .with_page_size(595.28, 841.89)
            .with_margins(Margins::uniform(72.0))
            .with_line_heights(LineHeights {
                body: 18.0,
                headings: [28.0, 24.0, 20.0, 18.0],
                blank: 9.0,
                table_row: 20.0,
                note: 14.0,
            })
            .with_wrap(WrapPolicy::new(90))
            .with_indent_step(18.0)
            .with_max_columns(8)
            .with_max_table_rows(50)
            .with_cell_budget(CellBudget {
                chars_per_unit: 0.0,
                min_chars: 50,
                max_chars: Some(50),
                ellipsis: "...".to_string(),
            })
    }
}
