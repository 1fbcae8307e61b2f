//! Narrative parsing: normalization, table extraction and block parsing.

mod bracket;
mod markdown;
mod normalize;
mod options;
mod table_extractor;
mod text_table;

pub use bracket::{find_matching_bracket, find_outer_array_start, find_outer_array_start_from};
pub use markdown::{strip_emphasis, MarkdownBlockParser};
pub use normalize::{NormalizeOptions, TextNormalizer};
pub use options::ParseOptions;
pub use table_extractor::{extract_tables, parse_grid, ExtractOptions, TableBlockExtractor};
