//! CLI command handlers, grouped by what they touch.

mod fetch;
mod format;
mod identify;

pub use fetch::{run_json, run_soup};
pub use format::{run_extract, run_fill, run_match, run_regex, run_standardise};
pub use identify::{run_formats, run_identify};
