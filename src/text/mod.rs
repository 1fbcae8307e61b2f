//! Text measurement helpers: wrapping, script detection, truncation.

mod script;
mod wrap;

pub use script::{contains_cjk, is_cjk_char, truncate_to_budget};
pub use wrap::{wrap, wrap_with, WrapPolicy};
