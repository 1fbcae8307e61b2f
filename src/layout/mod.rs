//! Pagination of content blocks into placed instructions.

mod cursor;
mod engine;
mod listener;
mod output;
mod policy;
mod stats;

pub use cursor::Cursor;
pub use engine::{decide_placement, PageFlowEngine, TextPlacement};
pub use listener::{CompositeListener, DefaultListener, FlowAction, FlowListener};
pub use output::FlowOutput;
pub use policy::{CellBudget, FlowPolicy, LineHeights, Margins, Spacing};
pub use stats::FlowStats;
