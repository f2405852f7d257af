//! Output formatting module

pub mod formatter;
pub mod human;
pub mod json;

pub use formatter::{emit_result, format_status, OutputFormat};
pub use human::print_result;
