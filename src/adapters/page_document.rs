//! Fixed-page document (PDF) adapter.

use crate::layout::{CellBudget, FlowPolicy, LineHeights, Margins};
use crate::text::WrapPolicy;

use super::FormatAdapter;

/// A4 portrait pages that break only when space runs out.
#[derive(Debug, Clone, Default)]
pub struct PageDocumentAdapter {
    _private: (),
}

impl PageDocumentAdapter {
    /// Create a new page document adapter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FormatAdapter for PageDocumentAdapter {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn description(&self) -> &str {
        "A4 pages, space-based pagination"
    }

    fn policy(&self) -> FlowPolicy {
        FlowPolicy::new()
            .with_page_size(595.28, 841.89)
            .with_margins(Margins::new(45.0, 45.0, 36.0, 36.0))
            .with_line_heights(LineHeights::default())
            .with_wrap(WrapPolicy::new(80))
            .with_indent_step(20.0)
            .with_max_columns(8)
            .with_image_height(350.0)
            .with_cell_budget(CellBudget {
                chars_per_unit: 0.18,
                min_chars: 4,
                max_chars: None,
                ellipsis: "..".to_string(),
            })
    }
}
