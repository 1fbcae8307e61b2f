//! Plain-text outline of flow output, one section per page.

use std::fmt::Write;

use crate::layout::FlowOutput;
use crate::model::{BlockKind, InstructionContent};

/// Render flow output as a readable page-by-page outline.
///
/// Each placed instruction becomes one line, indented by its x offset
/// relative to the leftmost instruction.
pub fn to_outline(output: &FlowOutput) -> String {
    let left = output
        .instructions
        .iter()
        .filter(|i| !i.is_page_break())
        .map(|i| i.x)
        .fold(f32::INFINITY, f32::min);

    let mut out = String::new();
    for page in 0..output.page_count {
        if page > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "--- Page {} ---", page + 1);

        for instruction in output.page(page) {
            let depth = ((instruction.x - left) / 20.0).round().max(0.0) as usize;
            let pad = "  ".repeat(depth);
            let line = match &instruction.content {
                InstructionContent::Text { kind, text } => match kind {
                    BlockKind::Heading(level) => {
                        format!("{} {}", "#".repeat(usize::from(*level)), text)
                    }
                    _ => text.clone(),
                },
                InstructionContent::TableRow { cells, header, .. } => {
                    let row = format!("| {} |", cells.join(" | "));
                    if *header {
                        format!("{} (header)", row)
                    } else {
                        row
                    }
                }
                InstructionContent::Image { source, .. } => format!("[image: {}]", source),
                InstructionContent::TableNote(note) => format!("({})", note),
                InstructionContent::PageBreak => continue,
            };
            let _ = writeln!(out, "{}{}", pad, line);
        }
    }

    out
}
