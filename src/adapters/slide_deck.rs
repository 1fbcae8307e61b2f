//! Slide deck (PPTX) adapter.

use crate::layout::{CellBudget, FlowPolicy, LineHeights, Margins, Spacing};
use crate::model::StyleSheet;
use crate::text::WrapPolicy;

use super::FormatAdapter;

/// Slide width in points (10 in).
const SLIDE_WIDTH: f32 = 720.0;

/// Slide height in points (5.625 in, 16:9).
const SLIDE_HEIGHT: f32 = 405.0;

/// 16:9 slides with count-based pagination.
///
/// A slide holds at most ten blocks and fourteen table rows; tables carry a
/// "rows x-y of n" note on every slide they span.
#[derive(Debug, Clone, Default)]
pub struct SlideDeckAdapter {
    _private: (),
}

impl SlideDeckAdapter {
    /// Create a new slide deck adapter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FormatAdapter for SlideDeckAdapter {
    fn name(&self) -> &str {
        "slides"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pptx", "ppt"]
    }

    fn description(&self) -> &str {
        "16:9 slides, count-based pagination"
    }

    fn policy(&self) -> FlowPolicy {
        FlowPolicy::new()
            .with_page_size(SLIDE_WIDTH, SLIDE_HEIGHT)
            .with_margins(Margins::new(45.0, 45.0, 36.0, 36.0))
            .with_line_heights(LineHeights {
                body: 20.0,
                headings: [30.0, 26.0, 22.0, 20.0],
                blank: 6.0,
                table_row: 20.0,
                note: 14.0,
            })
            .with_wrap(WrapPolicy::new(85))
            .with_indent_step(18.0)
            .with_max_items_per_page(10)
            .with_max_rows_per_table_page(14)
            .with_max_columns(6)
            .with_spacing(Spacing {
                after_heading: 6.0,
                after_table: 8.0,
                after_image: 6.0,
            })
            .with_image_height(240.0)
            .with_cell_budget(CellBudget {
                chars_per_unit: 5.0 / 72.0,
                min_chars: 8,
                max_chars: None,
                ellipsis: "..".to_string(),
            })
            .with_range_notes(true)
            .with_styles(StyleSheet::default().scaled(1.2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_policy() {
        let policy = SlideDeckAdapter::new().policy();
        assert_eq!(policy.max_items_per_page, Some(10));
        assert_eq!(policy.max_rows_per_table_page, Some(14));
        assert_eq!(policy.max_columns, Some(6));
        assert!(policy.range_notes);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_full_table_slide_fits() {
        // Header, fourteen rows and the range note fit on one slide.
        let policy = SlideDeckAdapter::new().policy();
        let needed = policy.line_heights.table_row * 15.0 + policy.line_heights.note;
        assert!(needed <= policy.content_height());
    }

    #[test]
    fn test_supports_both_extensions() {
        let adapter = SlideDeckAdapter::new();
        assert!(adapter.supports_extension("PPT"));
        assert!(adapter.supports_extension("pptx"));
        assert!(!adapter.supports_extension("pdf"));
    }
}
