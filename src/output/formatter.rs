//! Output formatting

use crate::backend::CommandResult;
use crate::output::human::{format_status_human, print_result};
use crate::output::json::{format_result_json, format_status_json};
use crate::session::StatusReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

pub fn format_status(report: &StatusReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_status_human(report),
        OutputFormat::Json => format_status_json(report),
    }
}

/// Write a command result in the requested format.
pub fn emit_result(result: &CommandResult, format: &OutputFormat) {
    match format {
        OutputFormat::Human => print_result(result),
        OutputFormat::Json => println!("{}", format_result_json(result)),
    }
}
