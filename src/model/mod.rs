//! Data model for narrative flow.
//!
//! Blocks and grids describe parsed narrative; placed instructions describe
//! where the flow engine put them. All values are created per render job.

mod block;
mod instruction;
mod style;
mod table;

pub use block::{BlockKind, ContentBlock, ImageBlock};
pub use instruction::{InstructionContent, PlacedInstruction, TableNote};
pub use style::{Rgb, StyleSheet, TextStyle};
pub use table::TableGrid;
