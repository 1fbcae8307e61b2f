//! Result of flowing a block stream.

use serde::{Deserialize, Serialize};

use super::FlowStats;
use crate::model::PlacedInstruction;

/// Placed instructions for one render job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowOutput {
    /// Instructions in emission order
    pub instructions: Vec<PlacedInstruction>,

    /// Pages or slides used
    pub page_count: usize,

    /// Statistics
    pub stats: FlowStats,
}

impl FlowOutput {
    /// Get the instructions placed on one page (page breaks excluded).
    pub fn page(&self, index: usize) -> impl Iterator<Item = &PlacedInstruction> {
        self.instructions
            .iter()
            .filter(move |i| i.page == index && !i.is_page_break())
    }

    /// Count page-break instructions.
    pub fn page_break_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_page_break()).count()
    }

    /// Text of every placed text line, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(|i| i.text())
    }

    /// Check if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
