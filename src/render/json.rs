//! JSON rendering for flow output.

use crate::error::Result;
use crate::layout::FlowOutput;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert flow output to JSON.
pub fn to_json(output: &FlowOutput, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(output)?,
        JsonFormat::Compact => serde_json::to_string(output)?,
    };
    Ok(json)
}
